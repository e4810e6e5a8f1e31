//! Relational patient store using SeaORM.

use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::entities::patients;
use pcms_core::patient::{Patient, PatientError, PatientStore, search_term};
use pcms_shared::PatientId;

/// Patient store backed by the `patients` table.
#[derive(Debug, Clone)]
pub struct SeaOrmPatientStore {
    db: DatabaseConnection,
}

impl SeaOrmPatientStore {
    /// Create a new store over an open connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl PatientStore for SeaOrmPatientStore {
    async fn add(&self, patient: Patient) -> Result<Patient, PatientError> {
        let now = Utc::now().into();
        let patient = patient.into_record();
        let active_model = patients::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            ..to_active_model(&patient)
        };

        patients::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(storage_error)?;

        debug!(patient_id = %patient.id, "Patient row inserted");
        Ok(patient)
    }

    async fn get(&self, id: PatientId) -> Result<Patient, PatientError> {
        let model = patients::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| PatientError::patient_not_found(id))?;

        to_domain(model)
    }

    async fn update(&self, patient: Patient) -> Result<(), PatientError> {
        let active_model = patients::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            updated_at: Set(Utc::now().into()),
            ..to_active_model(&patient)
        };

        let result = patients::Entity::update_many()
            .set(active_model)
            .filter(patients::Column::Id.eq(patient.id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            return Err(PatientError::patient_not_found(patient.id));
        }
        Ok(())
    }

    async fn remove(&self, id: PatientId) -> Result<(), PatientError> {
        let result = patients::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage_error)?;

        if result.rows_affected == 0 {
            return Err(PatientError::patient_not_found(id));
        }
        Ok(())
    }

    async fn find(&self, query: Option<&str>) -> Result<Vec<Patient>, PatientError> {
        let term = search_term(query);

        let mut select = patients::Entity::find();
        if let Some(term) = term {
            // LIKE only narrows the candidates; its case rules differ per
            // database, so containment is re-checked below.
            select = select
                .filter(Expr::col(patients::Column::Name).like(contains_pattern(term)));
        }

        let models = select
            .order_by_asc(patients::Column::CreatedAt)
            .order_by_asc(patients::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        models
            .into_iter()
            .map(to_domain)
            .filter(|patient| match (patient, term) {
                (Ok(patient), Some(term)) => patient.name_contains(term),
                _ => true,
            })
            .collect()
    }
}

/// `%term%` matching the term literally, with `\` as the escape character.
fn contains_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(term))).escape('\\')
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[allow(clippy::needless_pass_by_value)]
fn storage_error(err: DbErr) -> PatientError {
    PatientError::storage(err.to_string())
}

/// Convert domain patient to an active model with every column set.
fn to_active_model(patient: &Patient) -> patients::ActiveModel {
    patients::ActiveModel {
        id: Set(patient.id.into_inner()),
        name: Set(patient.name.clone()),
        age: Set(i16::from(patient.age)),
        phone_number: Set(patient.phone_number.clone()),
        email_address: Set(patient.email_address.clone()),
        address: Set(patient.address.clone()),
        medical_history: Set(patient.medical_history.clone()),
        ..Default::default()
    }
}

/// Convert database model to domain model.
fn to_domain(model: patients::Model) -> Result<Patient, PatientError> {
    let age = u8::try_from(model.age).map_err(|_| {
        PatientError::storage(format!(
            "patient {} has out-of-range age {}",
            model.id, model.age
        ))
    })?;

    Ok(Patient {
        id: PatientId::from_uuid(model.id),
        name: model.name,
        age,
        phone_number: model.phone_number,
        email_address: model.email_address,
        address: model.address,
        medical_history: model.medical_history,
        clinical_attachments: Vec::new(),
    })
}
