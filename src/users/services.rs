use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::error::{UserError, UserResult};
use crate::users::{
    dto::LoginRequest,
    password::verify_password,
    repo_types::User,
    validate::ValidationMode,
};

/// Normalize, validate and store a new user.
#[instrument(skip(db, input))]
pub async fn register(db: &PgPool, input: User) -> UserResult<User> {
    let user = input.prepare();
    user.validate(ValidationMode::Create)?;
    User::save(db, &user).await
}

/// Normalize, validate and apply a full update to user `id`.
#[instrument(skip(db, input))]
pub async fn edit(db: &PgPool, id: i64, input: User) -> UserResult<User> {
    let user = input.prepare();
    user.validate(ValidationMode::Update)?;
    User::update(db, id, &user).await
}

/// Check login credentials. Unknown email and wrong password are reported the
/// same way.
#[instrument(skip(db, req))]
pub async fn authenticate(db: &PgPool, req: LoginRequest) -> UserResult<User> {
    let probe = User {
        email: req.email,
        password: req.password,
        ..blank_user()
    }
    .prepare();
    probe.validate(ValidationMode::Login)?;

    let Some(user) = User::find_by_email(db, &probe.email).await? else {
        warn!(email = %probe.email, "login unknown email");
        return Err(UserError::InvalidCredentials);
    };

    if let Err(e) = verify_password(&user.password, &probe.password) {
        warn!(user_id = user.id, "login rejected");
        return Err(e);
    }

    info!(user_id = user.id, "user logged in");
    Ok(user)
}

fn blank_user() -> User {
    let now = time::OffsetDateTime::now_utc();
    User {
        id: 0,
        username: String::new(),
        email: String::new(),
        phone: String::new(),
        image_url: None,
        specialisation: String::new(),
        latitude: 0.0,
        longitude: 0.0,
        address: String::new(),
        region: String::new(),
        country: String::new(),
        password: String::new(),
        created_at: now,
        updated_at: now,
    }
}
