use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{NationalId, TypeConstraintError};

#[derive(Deserialize, Validate)]
/// Form data for looking a member up by national identifier.
pub struct LookupMemberForm {
    #[validate(length(min = 1))]
    pub national_id: String,
}

impl LookupMemberForm {
    /// Validates the raw input into a well-formed identifier.
    pub fn into_national_id(self) -> Result<NationalId, TypeConstraintError> {
        NationalId::new(self.national_id)
    }
}
