//! High-level facade: load inputs, resolve, emit.

use vndgen_core::{Catalog, Source};

use crate::emit::{ArtifactKind, emit};
use crate::model::DispatchModel;
use crate::policy::{PolicyFormat, PolicyTable};
use crate::profile::{Profile, ProfileKind};
use crate::Result;

/// Owns the inputs of one generator run.
///
/// ```ignore
/// let generator = Generator::new(catalog, table).profile_kind(ProfileKind::Egl);
/// let header = generator.generate(ArtifactKind::Header)?;
/// ```
#[derive(Clone, Debug)]
pub struct Generator {
    catalog: Catalog,
    table: PolicyTable,
    profile: Profile,
}

impl Generator {
    /// Uses the profile described by the table's `[target]` section.
    pub fn new(catalog: Catalog, table: PolicyTable) -> Self {
        let profile = Profile::from_target(table.target(), None);
        Self {
            catalog,
            table,
            profile,
        }
    }

    /// Parse a policy file and API descriptions.
    pub fn from_sources<'a>(
        policy: Source<'_>,
        format: PolicyFormat,
        descriptions: impl IntoIterator<Item = Source<'a>>,
    ) -> Result<Self> {
        let table = PolicyTable::parse(policy.origin, policy.text, format)?;
        let catalog = Catalog::load(descriptions)?;
        Ok(Self::new(catalog, table))
    }

    /// Switch preset, keeping the table's `[target]` overrides.
    pub fn profile_kind(mut self, kind: ProfileKind) -> Self {
        self.profile = Profile::from_target(self.table.target(), Some(kind));
        self
    }

    /// Replace the profile entirely.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn resolve(&self) -> Result<DispatchModel<'_>> {
        DispatchModel::build(&self.catalog, &self.table, self.profile.clone())
    }

    /// Resolve and render one artifact.
    pub fn generate(&self, kind: ArtifactKind) -> Result<String> {
        let model = self.resolve()?;
        Ok(emit(kind, &model))
    }
}
