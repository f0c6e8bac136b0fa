use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, auth::requests::LoginRequest};
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_username(&login_request.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "用户名或密码错误",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    };

    if verify_password(&login_request.password, &user.password_hash) {
        Ok(HttpResponse::Ok().json(ApiResponse::success(user, "登录成功")))
    } else {
        warn!("登录失败, 用户: {}", login_request.username);
        Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "用户名或密码错误",
        )))
    }
}
