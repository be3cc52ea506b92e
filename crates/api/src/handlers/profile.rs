use giapha_db::models::profile::Profile;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// GET /me -- the caller's own profile, whatever its status.
pub async fn get_me(auth: AuthUser) -> AppResult<Json<DataResponse<Profile>>> {
    Ok(Json(DataResponse { data: auth.profile }))
}
