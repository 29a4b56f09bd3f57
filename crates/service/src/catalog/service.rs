use std::sync::Arc;

use models::service::{self, NewService, ServiceKind};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::repository::ServiceRepository;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub name: String,
    #[serde(default, alias = "type")]
    pub kind: Option<ServiceKind>,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_min: i32,
    pub price: f64,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    pub name: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: Option<ServiceKind>,
    pub description: Option<String>,
    pub duration_min: Option<i32>,
    pub price: Option<f64>,
}

pub struct CatalogService {
    repo: Arc<dyn ServiceRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ServiceRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<service::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<service::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("service"))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ServiceInput) -> Result<service::Model, ServiceError> {
        let created = self.repo
            .create(NewService {
                name: input.name,
                kind: input.kind,
                description: input.description.unwrap_or_default(),
                duration_min: input.duration_min,
                price: input.price,
            })
            .await?;
        info!(service_id = %created.id, duration_min = created.duration_min, "service_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: ServicePatch) -> Result<service::Model, ServiceError> {
        let current = self.get(id).await?;
        let fields = NewService {
            name: patch.name.unwrap_or(current.name),
            kind: patch.kind.or(current.kind),
            description: patch.description.unwrap_or(current.description),
            duration_min: patch.duration_min.unwrap_or(current.duration_min),
            price: patch.price.unwrap_or(current.price),
        };
        let updated = self.repo.update(id, fields).await?.ok_or_else(|| ServiceError::not_found("service"))?;
        info!(service_id = %id, "service_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("service"));
        }
        info!(service_id = %id, "service_deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_all().await?;
        info!(removed, "services_cleared");
        Ok(removed)
    }

    /// Insert each default service whose name is not taken yet; returns how many were added.
    #[instrument(skip(self))]
    pub async fn seed_defaults(&self) -> Result<usize, ServiceError> {
        let mut created = 0;
        for svc in service::defaults() {
            if self.repo.find_by_name(&svc.name).await?.is_some() {
                continue;
            }
            self.repo.create(svc).await?;
            created += 1;
        }
        info!(created, "default_services_seeded");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::mock::MockServiceRepository;

    fn catalog() -> CatalogService {
        CatalogService::new(Arc::new(MockServiceRepository::default()))
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let c = catalog();
        assert_eq!(c.seed_defaults().await.unwrap(), 4);
        assert_eq!(c.seed_defaults().await.unwrap(), 0);
        let names: Vec<_> = c.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert!(names.contains(&"Servicio completo".to_string()));
    }

    #[tokio::test]
    async fn patch_keeps_unset_fields() {
        let c = catalog();
        let created = c
            .create(ServiceInput { name: "Afeitado".into(), kind: None, description: None, duration_min: 15, price: 6.0 })
            .await
            .unwrap();
        assert_eq!(created.description, "");
        let updated = c.update(created.id, ServicePatch { price: Some(7.5), ..Default::default() }).await.unwrap();
        assert_eq!(updated.name, "Afeitado");
        assert_eq!(updated.duration_min, 15);
        assert_eq!(updated.price, 7.5);

        let bad = c.update(created.id, ServicePatch { duration_min: Some(0), ..Default::default() }).await;
        assert!(matches!(bad, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let c = catalog();
        assert!(matches!(c.delete(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        c.seed_defaults().await.unwrap();
        assert_eq!(c.delete_all().await.unwrap(), 4);
        assert!(c.list().await.unwrap().is_empty());
    }

    #[test]
    fn input_accepts_type_alias() {
        let input: ServiceInput = serde_json::from_str(r#"{"name":"X","type":"hair","durationMin":10,"price":5}"#).unwrap();
        assert_eq!(input.kind, Some(ServiceKind::Hair));
    }
}
