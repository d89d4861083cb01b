//! Target profile: the names the emitted code is spelled with.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::policy::{RuntimeOverrides, TargetSection};
use crate::resolve::{AddMapping, DispatchPolicy, ObjectKind, Route};

/// Built-in profile presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// GLX dispatch, as in libGLX's vendor stubs.
    #[default]
    Glx,
    /// EGL dispatch, as in libEGL's vendor stubs.
    Egl,
}

impl ProfileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Glx => "glx",
            Self::Egl => "egl",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "glx" => Ok(Self::Glx),
            "egl" => Ok(Self::Egl),
            _ => Err(format!("unknown profile `{s}` (expected glx or egl)")),
        }
    }
}

/// Runtime library entry points called from generated stubs.
///
/// Lookups that a profile can't perform are `None`; policies that need
/// them are rejected during resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeApi {
    /// `current()`
    pub current: Option<String>,
    /// `by_display(display, slot)`
    pub display: Option<String>,
    /// `by_device(device, slot)`
    pub device: Option<String>,
    /// `by_screen(display, screen)`
    pub screen: Option<String>,
    /// `by_drawable(display, drawable, opcode, error)`
    pub drawable: Option<String>,
    /// `by_context(display, context, opcode)`
    pub context: Option<String>,
    /// `by_config(display, config, opcode)`
    pub config: Option<String>,
    /// `fetch(vendor, slot)`
    pub fetch: String,
    pub add_context: Option<String>,
    pub add_drawable: Option<String>,
    pub add_config: Option<String>,
    pub add_config_list: Option<String>,
    pub remove_context: Option<String>,
    pub remove_drawable: Option<String>,
    pub remove_config: Option<String>,
}

impl RuntimeApi {
    fn glx() -> Self {
        Self {
            current: Some("__glXDispatchApiExports->getCurrentDynDispatch".into()),
            display: None,
            device: None,
            screen: Some("__glXDispatchApiExports->getDynDispatch".into()),
            drawable: Some("__glxDispatchVendorByDrawable".into()),
            context: Some("__glxDispatchVendorByContext".into()),
            config: Some("__glxDispatchVendorByConfig".into()),
            fetch: "__glXDispatchApiExports->fetchDispatchEntry".into(),
            add_context: Some("__glXDispatchAddContextMapping".into()),
            add_drawable: Some("__glXDispatchAddDrawableMapping".into()),
            add_config: Some("__glXDispatchAddFBConfigMapping".into()),
            add_config_list: Some("__glXDispatchAddFBConfigListMapping".into()),
            remove_context: Some("__glXDispatchApiExports->removeVendorContextMapping".into()),
            remove_drawable: Some("__glXDispatchApiExports->removeVendorDrawableMapping".into()),
            remove_config: Some("__glXDispatchApiExports->removeVendorFBConfigMapping".into()),
        }
    }

    fn egl() -> Self {
        Self {
            current: Some("__eglDispatchVendorByCurrent".into()),
            display: Some("__eglDispatchVendorByDisplay".into()),
            device: Some("__eglDispatchVendorByDevice".into()),
            fetch: "__eglDispatchFetchVendorFunction".into(),
            ..Self::default()
        }
    }

    /// Vendor lookup entry for a route, with a description for diagnostics.
    ///
    /// `None` for routes without a generated stub.
    pub(crate) fn lookup(&self, route: &Route) -> Option<(&'static str, Option<&str>)> {
        let (what, entry) = match route {
            Route::None | Route::Custom => return None,
            Route::Current => ("current-context lookup", &self.current),
            Route::Display { .. } => ("display lookup", &self.display),
            Route::Device { .. } => ("device lookup", &self.device),
            Route::Screen { .. } => ("screen lookup", &self.screen),
            Route::Drawable { .. } => ("drawable lookup", &self.drawable),
            Route::Context { .. } => ("context lookup", &self.context),
            Route::Config { .. } => ("config lookup", &self.config),
        };
        Some((what, entry.as_deref()))
    }

    pub(crate) fn add(&self, mapping: &AddMapping) -> (&'static str, Option<&str>) {
        let (what, entry) = match mapping {
            AddMapping::Context => ("context mapping", &self.add_context),
            AddMapping::Drawable => ("drawable mapping", &self.add_drawable),
            AddMapping::Config => ("config mapping", &self.add_config),
            AddMapping::ConfigList { .. } => ("config-list mapping", &self.add_config_list),
        };
        (what, entry.as_deref())
    }

    pub(crate) fn remove(&self, kind: ObjectKind) -> (&'static str, Option<&str>) {
        let (what, entry) = match kind {
            ObjectKind::Context => ("context unmapping", &self.remove_context),
            ObjectKind::Drawable => ("drawable unmapping", &self.remove_drawable),
            ObjectKind::Config => ("config unmapping", &self.remove_config),
        };
        (what, entry.as_deref())
    }

    /// First runtime entry the policy's stub would call that this API lacks.
    pub fn missing_entry(&self, policy: &DispatchPolicy) -> Option<&'static str> {
        let lookup = self.lookup(&policy.route)?;
        let add = policy.adds_mapping.as_ref().map(|m| self.add(m));
        let remove = policy.removes_mapping.as_ref().map(|m| self.remove(m.kind));

        [Some(lookup), add, remove]
            .into_iter()
            .flatten()
            .find(|(_, entry)| entry.is_none())
            .map(|(what, _)| what)
    }

    fn apply(&mut self, overrides: &RuntimeOverrides) {
        let optional = [
            (&mut self.current, &overrides.current),
            (&mut self.display, &overrides.display),
            (&mut self.device, &overrides.device),
            (&mut self.screen, &overrides.screen),
            (&mut self.drawable, &overrides.drawable),
            (&mut self.context, &overrides.context),
            (&mut self.config, &overrides.config),
            (&mut self.add_context, &overrides.add_context),
            (&mut self.add_drawable, &overrides.add_drawable),
            (&mut self.add_config, &overrides.add_config),
            (&mut self.add_config_list, &overrides.add_config_list),
            (&mut self.remove_context, &overrides.remove_context),
            (&mut self.remove_drawable, &overrides.remove_drawable),
            (&mut self.remove_config, &overrides.remove_config),
        ];
        for (slot, value) in optional {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        if let Some(fetch) = &overrides.fetch {
            self.fetch.clone_from(fetch);
        }
    }
}

/// Naming configuration for header and source emission.
#[derive(Clone, Debug)]
pub struct Profile {
    pub(crate) kind: ProfileKind,
    /// Prefix of index enum entries; `<prefix>COUNT` ends the enum
    pub(crate) enum_prefix: String,
    pub(crate) header_guard: String,
    /// `#include` targets, with their `<>` or `""` delimiters
    pub(crate) header_includes: Vec<String>,
    pub(crate) source_includes: Vec<String>,
    /// Placed between return type and name, e.g. `EGLAPIENTRY`
    pub(crate) calling_convention: Option<String>,
    /// Written in front of public stubs
    pub(crate) export_macro: String,
    /// Struct name of the runtime's vendor record
    pub(crate) vendor_type: String,
    /// Generic function pointer type used in the pointer table
    pub(crate) function_pointer_type: String,
    pub(crate) names_table: String,
    pub(crate) functions_table: String,
    /// Runtime array mapping enum entries to dispatch indices
    pub(crate) slot_indices: Option<String>,
    /// Size tables `COUNT + 1` and end them with a null entry
    pub(crate) null_terminated_tables: bool,
    pub(crate) null_literal: String,
    pub(crate) runtime: RuntimeApi,
    /// Extra default-return literals keyed by canonical type
    pub(crate) sentinels: IndexMap<String, String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::glx()
    }
}

impl Profile {
    pub fn new(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Glx => Self::glx(),
            ProfileKind::Egl => Self::egl(),
        }
    }

    pub fn glx() -> Self {
        Self {
            kind: ProfileKind::Glx,
            enum_prefix: "__GLX_DISPATCH_".into(),
            header_guard: "G_GLXDISPATCH_STUBS_H".into(),
            header_includes: vec![
                "<GL/gl.h>".into(),
                "<GL/glx.h>".into(),
                "<GL/glxext.h>".into(),
            ],
            source_includes: vec![
                "\"glxdispatchstubs.h\"".into(),
                "\"g_glxdispatchstubs.h\"".into(),
                "<X11/Xlibint.h>".into(),
                "<GL/glxproto.h>".into(),
            ],
            calling_convention: None,
            export_macro: "PUBLIC".into(),
            vendor_type: "__GLXvendorInfo".into(),
            function_pointer_type: "__GLXextFuncPtr".into(),
            names_table: "__GLX_DISPATCH_FUNC_NAMES".into(),
            functions_table: "__GLX_DISPATCH_FUNCS".into(),
            slot_indices: Some("__glXDispatchFuncIndices".into()),
            null_terminated_tables: false,
            null_literal: "NULL".into(),
            runtime: RuntimeApi::glx(),
            sentinels: IndexMap::new(),
        }
    }

    pub fn egl() -> Self {
        Self {
            kind: ProfileKind::Egl,
            enum_prefix: "__EGL_DISPATCH_".into(),
            header_guard: "G_EGLDISPATCH_STUBS_H".into(),
            header_includes: vec![
                "<EGL/egl.h>".into(),
                "<EGL/eglext.h>".into(),
                "\"glvnd/libeglabi.h\"".into(),
            ],
            source_includes: vec![
                "\"egldispatchstubs.h\"".into(),
                "\"g_egldispatchstubs.h\"".into(),
            ],
            calling_convention: Some("EGLAPIENTRY".into()),
            export_macro: "PUBLIC".into(),
            vendor_type: "__EGLvendorInfo".into(),
            function_pointer_type: "__eglMustCastToProperFunctionPointerType".into(),
            names_table: "__EGL_DISPATCH_FUNC_NAMES".into(),
            functions_table: "__EGL_DISPATCH_FUNCS".into(),
            slot_indices: None,
            null_terminated_tables: true,
            null_literal: "NULL".into(),
            runtime: RuntimeApi::egl(),
            sentinels: IndexMap::new(),
        }
    }

    /// Preset named by `[target].profile` (or `kind` when given), with the
    /// section's overrides applied.
    pub fn from_target(target: &TargetSection, kind: Option<ProfileKind>) -> Self {
        let kind = kind.or(target.profile).unwrap_or_default();
        let mut profile = Self::new(kind);

        let strings = [
            (&mut profile.enum_prefix, &target.enum_prefix),
            (&mut profile.header_guard, &target.header_guard),
            (&mut profile.export_macro, &target.export_macro),
            (&mut profile.vendor_type, &target.vendor_type),
            (&mut profile.function_pointer_type, &target.function_pointer_type),
            (&mut profile.names_table, &target.names_table),
            (&mut profile.functions_table, &target.functions_table),
            (&mut profile.null_literal, &target.null_literal),
        ];
        for (field, value) in strings {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }

        if let Some(includes) = &target.header_includes {
            profile.header_includes.clone_from(includes);
        }
        if let Some(includes) = &target.source_includes {
            profile.source_includes.clone_from(includes);
        }
        // An empty string clears an optional preset value.
        if let Some(cc) = &target.calling_convention {
            profile.calling_convention = non_empty(cc);
        }
        if let Some(indices) = &target.slot_indices {
            profile.slot_indices = non_empty(indices);
        }
        if let Some(flag) = target.null_terminated_tables {
            profile.null_terminated_tables = flag;
        }

        profile.runtime.apply(&target.runtime);
        for (ty, literal) in &target.sentinels {
            profile.sentinels.insert(ty.clone(), literal.clone());
        }
        profile
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn runtime(&self) -> &RuntimeApi {
        &self.runtime
    }

    pub fn sentinels(&self) -> &IndexMap<String, String> {
        &self.sentinels
    }

    /// Set the index enum prefix.
    pub fn enum_prefix(mut self, value: impl Into<String>) -> Self {
        self.enum_prefix = value.into();
        self
    }

    /// Set the header include guard macro.
    pub fn header_guard(mut self, value: impl Into<String>) -> Self {
        self.header_guard = value.into();
        self
    }

    pub fn header_includes(mut self, value: Vec<String>) -> Self {
        self.header_includes = value;
        self
    }

    pub fn source_includes(mut self, value: Vec<String>) -> Self {
        self.source_includes = value;
        self
    }

    pub fn calling_convention(mut self, value: Option<String>) -> Self {
        self.calling_convention = value;
        self
    }

    pub fn slot_indices(mut self, value: Option<String>) -> Self {
        self.slot_indices = value;
        self
    }

    pub fn null_terminated_tables(mut self, value: bool) -> Self {
        self.null_terminated_tables = value;
        self
    }

    /// Add a default-return literal for a canonical type.
    pub fn sentinel(mut self, ty: impl Into<String>, literal: impl Into<String>) -> Self {
        self.sentinels.insert(ty.into(), literal.into());
        self
    }

    /// `<prefix><name>`, the function's index enum entry.
    pub(crate) fn enum_entry(&self, name: &str) -> String {
        format!("{}{}", self.enum_prefix, name)
    }

    /// `<prefix>COUNT`
    pub(crate) fn enum_count(&self) -> String {
        format!("{}COUNT", self.enum_prefix)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
