//! The resolved dispatch model: every policy-covered function, in slot order.

use vndgen_core::{Catalog, FunctionSignature};

use crate::policy::PolicyTable;
use crate::profile::Profile;
use crate::resolve::{DispatchPolicy, Resolver};
use crate::{ConsistencyError, ReferenceError, Result};

/// A function paired with its resolved policy.
#[derive(Clone, Debug)]
pub struct ResolvedFunction<'a> {
    pub signature: &'a FunctionSignature,
    pub policy: DispatchPolicy,
    /// Index into the emitted enum and tables.
    pub slot: usize,
}

impl ResolvedFunction<'_> {
    pub fn name(&self) -> &str {
        &self.signature.name
    }

    /// Emitted symbol: prefix plus function name.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.policy.name_prefix, self.signature.name)
    }
}

/// All resolved functions for one profile, sorted by name.
///
/// Slots follow name order, so a function keeps its slot as long as the
/// set of covered names is unchanged.
#[derive(Clone, Debug)]
pub struct DispatchModel<'a> {
    profile: Profile,
    functions: Vec<ResolvedFunction<'a>>,
}

impl<'a> DispatchModel<'a> {
    /// Resolve every policy entry against the catalog.
    pub fn build(catalog: &'a Catalog, table: &PolicyTable, profile: Profile) -> Result<Self> {
        let resolver = Resolver::for_profile(&profile);
        let mut functions = Vec::with_capacity(table.len());

        for raw in table.iter() {
            let signature = catalog
                .get(&raw.name)
                .ok_or_else(|| ReferenceError::MissingFunction {
                    function: raw.name.clone(),
                })?;
            let policy = resolver.resolve(signature, raw)?;
            if let Some(entry) = profile.runtime().missing_entry(&policy) {
                return Err(ConsistencyError::UnsupportedByProfile {
                    function: raw.name.clone(),
                    profile: profile.kind(),
                    entry,
                }
                .into());
            }
            functions.push(ResolvedFunction {
                signature,
                policy,
                slot: 0,
            });
        }

        functions.sort_by(|a, b| a.signature.name.cmp(&b.signature.name));
        for (slot, func) in functions.iter_mut().enumerate() {
            func.slot = slot;
        }

        tracing::info!(
            functions = functions.len(),
            profile = %profile.kind(),
            "resolved dispatch model"
        );
        Ok(Self { profile, functions })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Functions in slot order.
    pub fn functions(&self) -> &[ResolvedFunction<'a>] {
        &self.functions
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedFunction<'a>> {
        self.functions.iter().find(|f| f.name() == name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
