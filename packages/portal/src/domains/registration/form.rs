//! Registration form data and per-step validation.
//!
//! A fixed, typed field set; validation returns field-level reasons instead
//! of relying on required-attribute browser behavior. Field wire names stay
//! camelCase because they are the school document's attribute names.

use serde::{Deserialize, Serialize};

use crate::common::{FieldError, ValidationError};

/// The association's regions, as offered by the region select.
pub const REGIONS: [&str; 4] = ["Central", "Eastern", "Northern", "Western"];

/// Mutable local state of the registration wizard. Created on mount,
/// mutated field-by-field on input, discarded after a successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub school_name: String,
    pub center_number: String,
    pub school_email: String,
    pub school_phone1: String,
    pub region: String,
    pub district: String,
    pub admin_full_name: String,
    pub nin: String,
    pub role: String,
    pub contact1: String,
    pub password: String,
    pub terms_accept: bool,
}

/// The school document payload: every form field except the password and
/// the terms checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolFields {
    pub school_name: String,
    pub center_number: String,
    pub school_email: String,
    pub school_phone1: String,
    pub region: String,
    pub district: String,
    pub admin_full_name: String,
    pub nin: String,
    pub role: String,
    pub contact1: String,
}

impl RegistrationForm {
    /// Step 1: school information.
    pub fn validate_school_info(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();
        require(&mut fields, "schoolName", &self.school_name);
        require(&mut fields, "centerNumber", &self.center_number);
        require(&mut fields, "schoolEmail", &self.school_email);
        if !self.school_email.trim().is_empty() && !self.school_email.contains('@') {
            fields.push(FieldError::new("schoolEmail", "Enter a valid email address"));
        }
        require(&mut fields, "schoolPhone1", &self.school_phone1);
        if self.region.trim().is_empty() {
            fields.push(FieldError::new("region", "Select a region"));
        } else if !REGIONS.contains(&self.region.as_str()) {
            fields.push(FieldError::new("region", "Unknown region"));
        }
        require(&mut fields, "district", &self.district);
        finish(fields)
    }

    /// Step 2: representative information.
    pub fn validate_representative(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();
        require(&mut fields, "adminFullName", &self.admin_full_name);
        require(&mut fields, "nin", &self.nin);
        require(&mut fields, "role", &self.role);
        require(&mut fields, "contact1", &self.contact1);
        require(&mut fields, "password", &self.password);
        finish(fields)
    }

    /// Step 3: review & submit.
    pub fn validate_review(&self) -> Result<(), ValidationError> {
        if self.terms_accept {
            Ok(())
        } else {
            Err(ValidationError::single(
                "termsAccept",
                "You must accept the terms and conditions to proceed.",
            ))
        }
    }

    pub fn school_fields(&self) -> SchoolFields {
        SchoolFields {
            school_name: self.school_name.clone(),
            center_number: self.center_number.clone(),
            school_email: self.school_email.clone(),
            school_phone1: self.school_phone1.clone(),
            region: self.region.clone(),
            district: self.district.clone(),
            admin_full_name: self.admin_full_name.clone(),
            nin: self.nin.clone(),
            role: self.role.clone(),
            contact1: self.contact1.clone(),
        }
    }

    /// Document payload as a JSON map, keyed by the wire field names.
    pub fn document_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self.school_fields()) {
            Ok(serde_json::Value::Object(map)) => map,
            // SchoolFields is a plain struct of strings; serialization
            // cannot produce anything else.
            _ => serde_json::Map::new(),
        }
    }
}

fn require(fields: &mut Vec<FieldError>, name: &'static str, value: &str) {
    if value.trim().is_empty() {
        fields.push(FieldError::required(name));
    }
}

fn finish(fields: Vec<FieldError>) -> Result<(), ValidationError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(fields))
    }
}

#[cfg(test)]
pub(crate) fn filled_form() -> RegistrationForm {
    RegistrationForm {
        school_name: "Hilltop College".to_string(),
        center_number: "U0042".to_string(),
        school_email: "admin@hilltop.ac.ug".to_string(),
        school_phone1: "+256700000000".to_string(),
        region: "Central".to_string(),
        district: "Kampala".to_string(),
        admin_full_name: "Jane Admin".to_string(),
        nin: "CM1234567890AB".to_string(),
        role: "Games Teacher".to_string(),
        contact1: "+256700000001".to_string(),
        password: "correct horse battery".to_string(),
        terms_accept: true,
    }
}
