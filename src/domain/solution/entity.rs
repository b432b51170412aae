//! Solution entity and identifier

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    validate_metadata, validate_name, validate_origin, validate_type_code, SolutionValidationError,
};

/// Solution identifier - 36-character UUID text, as stored in the
/// SOLUTION_ID CHAR(36) column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SolutionId(String);

impl SolutionId {
    /// Accept a client-supplied ID after checking it is a well-formed
    /// hyphenated UUID
    pub fn new(id: impl Into<String>) -> Result<Self, SolutionValidationError> {
        let id = id.into();
        if id.len() != 36 || Uuid::parse_str(&id).is_err() {
            return Err(SolutionValidationError::InvalidSolutionId(id));
        }
        Ok(Self(id))
    }

    /// Generate a fresh random ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SolutionId {
    type Error = SolutionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SolutionId> for String {
    fn from(id: SolutionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SolutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog solution, mapped to the C_SOLUTION table.
///
/// The view/download/rating counters are computed web statistics: they are
/// readable here but have no public mutators, and the generic repository
/// update never writes them. The only sanctioned mutation paths are the
/// dedicated increment operations on [`super::SolutionRepository`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// None until persisted; clients may supply their own UUID at creation
    #[serde(skip_serializing_if = "Option::is_none")]
    solution_id: Option<SolutionId>,
    /// Solution name (required)
    name: String,
    /// Free-form JSON text
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<String>,
    /// Inactive means soft-deleted
    active: bool,
    /// Model type code; the valid set lives in server-side reference data
    #[serde(skip_serializing_if = "Option::is_none")]
    model_type_code: Option<String>,
    /// Toolkit type code; reference data likewise
    #[serde(skip_serializing_if = "Option::is_none")]
    toolkit_type_code: Option<String>,
    /// URI of the federation peer that provided this solution
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    /// Owning user, by ID only
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    view_count: i64,
    download_count: i64,
    rating_count: i64,
    /// Average rating in tenths; e.g. 35 means 3.5
    rating_average_tenths: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    featured: Option<bool>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Solution {
    /// Create a new solution from the required fields. All counters start
    /// at zero and the ID is unset until the persistence boundary assigns
    /// one.
    pub fn new(name: impl Into<String>, active: bool) -> Result<Self, SolutionValidationError> {
        let name = name.into();
        validate_name(&name)?;

        let now = Utc::now();

        Ok(Self {
            solution_id: None,
            name,
            metadata: None,
            active,
            model_type_code: None,
            toolkit_type_code: None,
            origin: None,
            user_id: None,
            view_count: 0,
            download_count: 0,
            rating_count: 0,
            rating_average_tenths: 0,
            featured: None,
            created: now,
            modified: now,
        })
    }

    /// Reconstruct a persisted row, computed counters included. This is a
    /// hydration path for storage implementations, not a creation path.
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        solution_id: SolutionId,
        name: String,
        metadata: Option<String>,
        active: bool,
        model_type_code: Option<String>,
        toolkit_type_code: Option<String>,
        origin: Option<String>,
        user_id: Option<String>,
        view_count: i64,
        download_count: i64,
        rating_count: i64,
        rating_average_tenths: i64,
        featured: Option<bool>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            solution_id: Some(solution_id),
            name,
            metadata,
            active,
            model_type_code,
            toolkit_type_code,
            origin,
            user_id,
            view_count,
            download_count,
            rating_count,
            rating_average_tenths,
            featured,
            created,
            modified,
        }
    }

    // Getters

    pub fn solution_id(&self) -> Option<&SolutionId> {
        self.solution_id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn model_type_code(&self) -> Option<&str> {
        self.model_type_code.as_deref()
    }

    pub fn toolkit_type_code(&self) -> Option<&str> {
        self.toolkit_type_code.as_deref()
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn view_count(&self) -> i64 {
        self.view_count
    }

    pub fn download_count(&self) -> i64 {
        self.download_count
    }

    pub fn rating_count(&self) -> i64 {
        self.rating_count
    }

    pub fn rating_average_tenths(&self) -> i64 {
        self.rating_average_tenths
    }

    pub fn featured(&self) -> Option<bool> {
        self.featured
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    // Mutators

    /// Set a client-chosen ID before first persistence
    pub fn set_solution_id(&mut self, id: SolutionId) {
        self.solution_id = Some(id);
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), SolutionValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_metadata(
        &mut self,
        metadata: Option<String>,
    ) -> Result<(), SolutionValidationError> {
        if let Some(ref m) = metadata {
            validate_metadata(m)?;
        }
        self.metadata = metadata;
        self.touch();
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.touch();
    }

    pub fn set_model_type_code(
        &mut self,
        code: Option<String>,
    ) -> Result<(), SolutionValidationError> {
        if let Some(ref c) = code {
            validate_type_code(c)?;
        }
        self.model_type_code = code;
        self.touch();
        Ok(())
    }

    pub fn set_toolkit_type_code(
        &mut self,
        code: Option<String>,
    ) -> Result<(), SolutionValidationError> {
        if let Some(ref c) = code {
            validate_type_code(c)?;
        }
        self.toolkit_type_code = code;
        self.touch();
        Ok(())
    }

    pub fn set_origin(&mut self, origin: Option<String>) -> Result<(), SolutionValidationError> {
        if let Some(ref o) = origin {
            validate_origin(o)?;
        }
        self.origin = origin;
        self.touch();
        Ok(())
    }

    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
        self.touch();
    }

    pub fn set_featured(&mut self, featured: Option<bool>) {
        self.featured = featured;
        self.touch();
    }

    // Crate-private counter paths, used only by repository implementations

    pub(crate) fn record_view(&mut self) {
        self.view_count += 1;
    }

    pub(crate) fn record_download(&mut self) {
        self.download_count += 1;
    }

    pub(crate) fn set_rating_stats(&mut self, rating_count: i64, rating_average_tenths: i64) {
        self.rating_count = rating_count;
        self.rating_average_tenths = rating_average_tenths;
    }

    /// Generic update must never alter the computed counters; storage
    /// implementations call this to carry the stored values forward.
    pub(crate) fn copy_counters_from(&mut self, stored: &Solution) {
        self.view_count = stored.view_count;
        self.download_count = stored.download_count;
        self.rating_count = stored.rating_count;
        self.rating_average_tenths = stored.rating_average_tenths;
    }

    pub(crate) fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

/// The ID is the primary key, so identity comparison uses it alone
impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.solution_id == other.solution_id
    }
}

impl Eq for Solution {}

impl std::hash::Hash for Solution {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.solution_id.hash(state);
    }
}
