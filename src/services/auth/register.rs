use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode, auth::requests::RegisterRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_username, validate_year};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 检查用户名是否已存在
    if let Err(response) = check_username_exists(&storage, &register_request.username).await {
        return Ok(response);
    }

    // 2. 验证用户名合法性
    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 3. 验证年级（学生可选字段）
    if let Err(msg) = validate_year(register_request.year) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 年级只对学生保留，其他角色即使传入也不落库
    let year = if register_request.role == UserRole::Student {
        register_request.year
    } else {
        None
    };

    // 4. 哈希密码后入库
    match hash_password(&register_request.password) {
        Ok(password_hash) => {
            let create_request = CreateUserRequest {
                username: register_request.username,
                password: password_hash,
                role: register_request.role,
                year,
            };

            match storage.create_user(create_request).await {
                Ok(user) => {
                    Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
                }
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::RegisterFailed,
                        format!("注册失败: {e}"),
                    )),
                ),
            }
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("密码哈希失败: {e}"),
            )),
        ),
    }
}

async fn check_username_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use std::sync::Arc;

    fn register(username: &str, role: UserRole, year: Option<i32>) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: "pass123456".to_string(),
            role,
            year,
        }
    }

    #[tokio::test]
    async fn test_register_keeps_year_only_for_students() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        let service = AuthService {
            storage: Some(storage.clone()),
        };
        let request = TestRequest::default().to_http_request();

        // 教师带年级注册，年级不落库
        let resp = handle_register(
            &service,
            register("teacher01", UserRole::Teacher, Some(2026)),
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let teacher = storage
            .get_user_by_username("teacher01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(teacher.year, None);

        // 学生的年级照常保留
        let resp = handle_register(
            &service,
            register("student01", UserRole::Student, Some(2026)),
            &request,
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let student = storage
            .get_user_by_username("student01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.year, Some(2026));
    }
}
