// src/services/user.rs
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::dtos::user::{LoginRequest, RegisterRequest, RoleChangeRequest, UserPatchRequest, UserResponse};
use crate::error::AppError;
use crate::models::user::User;
use crate::repository::{DynUserRepository, NewUser};

#[derive(Clone)]
pub struct UserService {
    users: DynUserRepository,
}

impl UserService {
    pub fn new(users: DynUserRepository) -> Self {
        Self { users }
    }

    pub async fn register(&self, data: RegisterRequest) -> Result<UserResponse, AppError> {
        if data.username.trim().is_empty() {
            return Err(AppError::validation("Username required"));
        }
        if !data.email.contains('@') {
            return Err(AppError::validation("A valid email is required"));
        }
        if data.password.len() < 6 {
            return Err(AppError::validation("Password too short"));
        }

        if self.users.find_by_username(&data.username).await?.is_some() {
            return Err(AppError::conflict("Username already taken"));
        }
        if self.users.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("Email already taken"));
        }

        let password_hash = hash(&data.password, DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

        let created = self
            .users
            .insert(&NewUser {
                username: data.username,
                email: data.email,
                password_hash,
                role: data.role,
            })
            .await?;

        Ok(created.into())
    }

    /// Credential check for the login endpoint. Unknown username and wrong
    /// password are indistinguishable to the caller.
    pub async fn login(&self, data: LoginRequest) -> Result<User, AppError> {
        if data.username.trim().is_empty() {
            return Err(AppError::validation("Username required"));
        }
        if data.password.is_empty() {
            return Err(AppError::validation("Password required"));
        }

        let user = self
            .users
            .find_by_username(&data.username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        let ok = verify(&data.password, &user.password_hash)
            .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

        if !ok {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        Ok(user)
    }

    pub async fn update_partial(
        &self,
        id: i64,
        data: UserPatchRequest,
    ) -> Result<UserResponse, AppError> {
        let mut existing = self.find_existing(id).await?;

        if let Some(username) = data.username {
            if username.trim().is_empty() {
                return Err(AppError::validation("Username required"));
            }
            if username != existing.username
                && self.users.find_by_username(&username).await?.is_some()
            {
                return Err(AppError::conflict("Username already taken"));
            }
            existing.username = username;
        }

        if let Some(email) = data.email {
            if !email.contains('@') {
                return Err(AppError::validation("A valid email is required"));
            }
            if email != existing.email && self.users.find_by_email(&email).await?.is_some() {
                return Err(AppError::conflict("Email already taken"));
            }
            existing.email = email;
        }

        if let Some(password) = data.password {
            if password.len() < 6 {
                return Err(AppError::validation("Password too short"));
            }
            existing.password_hash = hash(&password, DEFAULT_COST)
                .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;
        }

        let saved = self.users.update(&existing).await?;
        Ok(saved.into())
    }

    pub async fn update_role(
        &self,
        id: i64,
        data: RoleChangeRequest,
    ) -> Result<UserResponse, AppError> {
        let mut existing = self.find_existing(id).await?;
        existing.role = data.role;

        let saved = self.users.update(&existing).await?;
        Ok(saved.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.find_existing(id).await?;
        self.users.delete(id).await
    }

    async fn find_existing(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User not found: {id}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::user::Role;
    use crate::repository::memory::MemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserRepository::default()))
    }

    fn alice() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let service = service();
        let created = service.register(alice()).await.unwrap();
        assert_eq!(created.role, Role::Admin);

        let user = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn register_rejects_weak_input() {
        let service = service();

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..alice()
        };
        assert!(matches!(
            service.register(bad_email).await,
            Err(AppError::ValidationError(_))
        ));

        let short_password = RegisterRequest {
            password: "abc".to_string(),
            ..alice()
        };
        assert!(matches!(
            service.register(short_password).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_username_or_email_conflicts() {
        let service = service();
        service.register(alice()).await.unwrap();

        let same_username = RegisterRequest {
            email: "other@example.com".to_string(),
            ..alice()
        };
        assert!(matches!(
            service.register(same_username).await,
            Err(AppError::Conflict(_))
        ));

        let same_email = RegisterRequest {
            username: "alice2".to_string(),
            ..alice()
        };
        assert!(matches!(
            service.register(same_email).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let service = service();
        service.register(alice()).await.unwrap();

        let wrong_password = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        let unknown_user = service
            .login(LoginRequest {
                username: "bob".to_string(),
                password: "hunter22".to_string(),
            })
            .await;

        assert!(matches!(wrong_password, Err(AppError::Unauthorized(_))));
        assert!(matches!(unknown_user, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn patch_rehashes_the_password() {
        let service = service();
        let created = service.register(alice()).await.unwrap();

        service
            .update_partial(
                created.id,
                UserPatchRequest {
                    password: Some("new-secret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "new-secret".to_string(),
            })
            .await
            .is_ok());
        assert!(service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn empty_patch_changes_nothing() {
        let service = service();
        let created = service.register(alice()).await.unwrap();

        let updated = service
            .update_partial(created.id, UserPatchRequest::default())
            .await
            .unwrap();

        assert_eq!(updated.username, "alice");
        assert_eq!(updated.email, "alice@example.com");
    }

    #[tokio::test]
    async fn patch_to_taken_username_conflicts() {
        let service = service();
        service.register(alice()).await.unwrap();
        let bob = service
            .register(RegisterRequest {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password: "hunter22".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();

        let result = service
            .update_partial(
                bob.id,
                UserPatchRequest {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn role_change_overwrites_unconditionally() {
        let service = service();
        let created = service.register(alice()).await.unwrap();

        let updated = service
            .update_role(created.id, RoleChangeRequest { role: Role::User })
            .await
            .unwrap();

        assert_eq!(updated.role, Role::User);
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let service = service();

        assert!(matches!(
            service.delete(12345).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_user() {
        let service = service();
        let created = service.register(alice()).await.unwrap();

        service.delete(created.id).await.unwrap();

        assert!(matches!(
            service.update_role(created.id, RoleChangeRequest { role: Role::User }).await,
            Err(AppError::NotFound(_))
        ));
    }
}
