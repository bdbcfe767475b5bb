//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, OrgId, PatientId, UserId};
use domain_claims::{ClinicalEventType, NewClaim, Role, User};
use infra_queue::ClaimEvent;

/// Builder for claim submission data
pub struct NewClaimBuilder {
    organization: Option<OrgId>,
    patient_id: PatientId,
    provider_id: UserId,
    diagnosis_code: String,
    procedure_code: Option<String>,
    amount: Decimal,
    submitted_date: NaiveDate,
    service_date: NaiveDate,
}

impl Default for NewClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewClaimBuilder {
    /// Creates a builder with valid defaults
    pub fn new() -> Self {
        Self {
            organization: None,
            patient_id: PatientId::new_v7(),
            provider_id: UserId::new_v7(),
            diagnosis_code: "E11.9".to_string(),
            procedure_code: Some("99214".to_string()),
            amount: dec!(850.00),
            submitted_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            service_date: NaiveDate::from_ymd_opt(2024, 5, 28).unwrap(),
        }
    }

    /// Sets the organization hint carried in the submission
    pub fn with_organization(mut self, organization: OrgId) -> Self {
        self.organization = Some(organization);
        self
    }

    /// Sets the patient
    pub fn with_patient_id(mut self, patient_id: PatientId) -> Self {
        self.patient_id = patient_id;
        self
    }

    /// Sets the submitting provider
    pub fn with_provider_id(mut self, provider_id: UserId) -> Self {
        self.provider_id = provider_id;
        self
    }

    /// Sets the diagnosis code
    pub fn with_diagnosis_code(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_code = code.into();
        self
    }

    /// Sets the procedure code
    pub fn with_procedure_code(mut self, code: impl Into<String>) -> Self {
        self.procedure_code = Some(code.into());
        self
    }

    /// Clears the procedure code
    pub fn without_procedure_code(mut self) -> Self {
        self.procedure_code = None;
        self
    }

    /// Sets the claimed amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the service date
    pub fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = date;
        self
    }

    /// Builds the submission data
    pub fn build(self) -> NewClaim {
        NewClaim {
            organization: self.organization,
            patient_id: self.patient_id,
            provider_id: self.provider_id,
            diagnosis_code: self.diagnosis_code,
            procedure_code: self.procedure_code,
            amount: self.amount,
            submitted_date: self.submitted_date,
            service_date: self.service_date,
        }
    }
}

/// Builder for user test data
pub struct UserBuilder {
    organization: OrgId,
    email: String,
    role: Role,
    patient_id: Option<PatientId>,
    is_active: bool,
}

impl UserBuilder {
    /// Creates a builder for an active provider in the given organization
    pub fn new(organization: OrgId) -> Self {
        Self {
            organization,
            email: "user@example.com".to_string(),
            role: Role::Provider,
            patient_id: None,
            is_active: true,
        }
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Links the user to a patient record
    pub fn with_patient_id(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    /// Deactivates the user
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Builds the user
    pub fn build(self) -> User {
        let mut user = User::new(self.organization, self.email, self.role);
        user.patient_id = self.patient_id;
        user.is_active = self.is_active;
        user
    }
}

/// Builder for claim events
pub struct ClaimEventBuilder {
    event_type: ClinicalEventType,
    claim_id: ClaimId,
    organization: OrgId,
    occurred_at: DateTime<Utc>,
    treatment_type: Option<String>,
}

impl ClaimEventBuilder {
    /// Creates a builder for an admission event against the given claim
    pub fn new(claim_id: ClaimId, organization: OrgId) -> Self {
        Self {
            event_type: ClinicalEventType::PatientAdmission,
            claim_id,
            organization,
            occurred_at: Utc::now(),
            treatment_type: None,
        }
    }

    /// Sets the event type
    pub fn with_event_type(mut self, event_type: ClinicalEventType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Sets the occurrence timestamp
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Sets the treatment description
    pub fn with_treatment_type(mut self, treatment: impl Into<String>) -> Self {
        self.treatment_type = Some(treatment.into());
        self
    }

    /// Builds the event
    pub fn build(self) -> ClaimEvent {
        let event = ClaimEvent::new(
            self.event_type,
            self.claim_id,
            self.organization,
            self.occurred_at,
        );
        match self.treatment_type {
            Some(treatment) => event.with_treatment_type(treatment),
            None => event,
        }
    }
}
