//! Reconciling a raw policy entry with its function signature.

use indexmap::IndexMap;
use vndgen_core::FunctionSignature;

use super::model::{
    AddMapping, DispatchPolicy, Guard, Linkage, ObjectKind, ParamRef, Protocol, RemoveMapping,
    Route,
};
use super::returns::{CONNECTION_TYPES, default_return, key_types};
use crate::policy::{MappingKind, Method, ParamSpec, RawPolicy};
use crate::profile::Profile;
use crate::{ConsistencyError, InputError, ReferenceError, Result};

/// Turns raw policy entries into [`DispatchPolicy`] values.
///
/// Resolution is all-or-nothing: the first inconsistency is returned and
/// no partial policy escapes.
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    /// Extra default-return literals, consulted before the built-in table.
    sentinels: IndexMap<String, String>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver using the profile's extra sentinels.
    pub fn for_profile(profile: &Profile) -> Self {
        Self {
            sentinels: profile.sentinels().clone(),
        }
    }

    pub fn resolve(&self, func: &FunctionSignature, raw: &RawPolicy) -> Result<DispatchPolicy> {
        let linkage = linkage(func, raw)?;
        let guard = match &raw.extension {
            Some(ext) => Some(guard(func, ext)?),
            None => None,
        };
        let in_header = raw
            .inheader
            .unwrap_or(raw.method != Method::None && linkage != Linkage::Static);

        let mut policy = DispatchPolicy {
            route: Route::None,
            default_return: None,
            guard,
            display: None,
            adds_mapping: None,
            removes_mapping: None,
            linkage,
            name_prefix: raw.prefix.clone().unwrap_or_default(),
            in_header,
        };

        policy.route = route(func, raw)?;
        if !policy.route.has_stub() {
            return Ok(policy);
        }

        if func.has_return() {
            let literal = match &raw.retval {
                Some(retval) => retval.clone(),
                None => default_return(&func.return_type, &self.sentinels),
            };
            policy.default_return = Some(literal);
        }

        policy.adds_mapping = add_mapping(func, raw)?;
        policy.removes_mapping = remove_mapping(func, raw, &policy.route)?;
        policy.display = display(func, raw, &policy)?;

        tracing::debug!(
            function = %func.name,
            method = %policy.method(),
            key = ?policy.key().map(ToString::to_string),
            "resolved policy"
        );
        Ok(policy)
    }
}

/// Resolve with the built-in default-return table only.
pub fn resolve(func: &FunctionSignature, raw: &RawPolicy) -> Result<DispatchPolicy> {
    Resolver::new().resolve(func, raw)
}

fn linkage(func: &FunctionSignature, raw: &RawPolicy) -> Result<Linkage> {
    match (raw.is_static.unwrap_or(false), raw.public.unwrap_or(false)) {
        (true, true) => Err(ConsistencyError::StaticAndPublic {
            function: func.name.clone(),
        }
        .into()),
        (true, false) => Ok(Linkage::Static),
        (false, true) => Ok(Linkage::Public),
        (false, false) => Ok(Linkage::Default),
    }
}

fn guard(func: &FunctionSignature, ext: &str) -> Result<Guard> {
    let mut chars = ext.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(InputError::PolicyField {
            function: func.name.clone(),
            field: "extension",
            message: format!("`{ext}` is not a macro name"),
        }
        .into());
    }
    Ok(Guard::defined(ext))
}

fn route(func: &FunctionSignature, raw: &RawPolicy) -> Result<Route> {
    let lookup_key = || match &raw.key {
        Some(spec) => param_ref(func, spec, "key"),
        None => implicit_key(func, raw.method),
    };

    let route = match raw.method {
        Method::None => Route::None,
        Method::Custom => Route::Custom,
        Method::Current => Route::Current,
        Method::Display => Route::Display { key: lookup_key()? },
        Method::Device => Route::Device { key: lookup_key()? },
        Method::Screen => Route::Screen { key: lookup_key()? },
        // Only the screen number is needed from the visual.
        Method::VisualInfo => Route::Screen {
            key: ParamRef::raw(format!("({})->screen", lookup_key()?)),
        },
        Method::Drawable => {
            let key = lookup_key()?;
            if raw.opcode.is_some() && raw.error.is_none() {
                return Err(ConsistencyError::MissingErrorCode {
                    function: func.name.clone(),
                }
                .into());
            }
            Route::Drawable {
                key,
                protocol: protocol(raw),
            }
        }
        Method::Context => Route::Context {
            key: lookup_key()?,
            protocol: protocol(raw),
        },
        Method::Config => Route::Config {
            key: lookup_key()?,
            protocol: protocol(raw),
        },
    };
    Ok(route)
}

fn protocol(raw: &RawPolicy) -> Protocol {
    let defaults = Protocol::default();
    Protocol {
        opcode: raw.opcode.clone().unwrap_or(defaults.opcode),
        error: raw.error.clone().unwrap_or(defaults.error),
    }
}

/// First parameter of the method's key type, or the one named `screen`.
fn implicit_key(func: &FunctionSignature, method: Method) -> Result<ParamRef> {
    let index = match key_types(method) {
        Some(types) => func.param_index_by_type(types),
        None => func.param_index("screen"),
    };

    index
        .map(|i| ParamRef::param(i, &func.params[i].name))
        .ok_or_else(|| {
            ReferenceError::NoKeyCandidate {
                function: func.name.clone(),
                method,
            }
            .into()
        })
}

/// Interpret a policy parameter reference against the signature.
fn param_ref(func: &FunctionSignature, spec: &ParamSpec, field: &'static str) -> Result<ParamRef> {
    let by_index = |i: usize| func.params.get(i).map(|p| ParamRef::param(i, &p.name));

    let found = match spec {
        ParamSpec::Index(i) => by_index(*i),
        ParamSpec::Text(text) => {
            if let Ok(i) = text.trim().parse::<usize>() {
                by_index(i)
            } else if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
                return Ok(ParamRef::raw(text.clone()));
            } else {
                func.param_index(text)
                    .map(|i| ParamRef::param(i, text.clone()))
            }
        }
    };

    found.ok_or_else(|| {
        ReferenceError::UnknownParameter {
            function: func.name.clone(),
            field,
            spec: spec.to_string(),
        }
        .into()
    })
}

fn add_mapping(func: &FunctionSignature, raw: &RawPolicy) -> Result<Option<AddMapping>> {
    let Some(kind) = raw.add_mapping else {
        return Ok(None);
    };
    if !func.has_return() {
        return Err(ConsistencyError::MappingWithoutReturn {
            function: func.name.clone(),
        }
        .into());
    }

    let mapping = match kind {
        MappingKind::Context => AddMapping::Context,
        MappingKind::Drawable => AddMapping::Drawable,
        MappingKind::Config => AddMapping::Config,
        MappingKind::ConfigList => {
            let Some(count) = &raw.count else {
                return Err(ConsistencyError::MissingCount {
                    function: func.name.clone(),
                }
                .into());
            };
            AddMapping::ConfigList {
                count: param_ref(func, count, "count")?,
            }
        }
    };
    Ok(Some(mapping))
}

fn remove_mapping(
    func: &FunctionSignature,
    raw: &RawPolicy,
    route: &Route,
) -> Result<Option<RemoveMapping>> {
    let Some(kind) = raw.remove_mapping else {
        return Ok(None);
    };
    let Some(object) = ObjectKind::from_mapping(kind) else {
        return Err(ConsistencyError::InvalidRemoval {
            function: func.name.clone(),
            kind,
        }
        .into());
    };

    let key = match (&raw.remove_key, route.key()) {
        (Some(spec), _) => param_ref(func, spec, "remove_key")?,
        // The dispatch key only names the removed object when both are the same kind.
        (None, Some(key)) if route.object_kind() == Some(object) => key.clone(),
        (None, _) => {
            return Err(ConsistencyError::ImplicitRemovalKey {
                function: func.name.clone(),
                kind,
                method: raw.method,
            }
            .into());
        }
    };
    Ok(Some(RemoveMapping { kind: object, key }))
}

fn display(
    func: &FunctionSignature,
    raw: &RawPolicy,
    policy: &DispatchPolicy,
) -> Result<Option<ParamRef>> {
    if let Some(spec) = &raw.display {
        return param_ref(func, spec, "display").map(Some);
    }
    if let Route::Display { key } = &policy.route {
        return Ok(Some(key.clone()));
    }
    if let Some(i) = func.param_index_by_type(CONNECTION_TYPES) {
        return Ok(Some(ParamRef::param(i, &func.params[i].name)));
    }

    if needs_display(policy) {
        return Err(ReferenceError::MissingDisplay {
            function: func.name.clone(),
        }
        .into());
    }
    Ok(None)
}

/// Mapping updates are keyed by connection whatever the lookup method.
fn needs_display(policy: &DispatchPolicy) -> bool {
    if policy.adds_mapping.is_some() || policy.removes_mapping.is_some() {
        return true;
    }
    matches!(
        policy.route,
        Route::Screen { .. } | Route::Drawable { .. } | Route::Config { .. }
    )
}
