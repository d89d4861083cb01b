//! Core emitter struct, header and table layout.

use super::ArtifactKind;
use crate::model::{DispatchModel, ResolvedFunction};
use crate::profile::Profile;
use crate::resolve::Route;

/// Renders a [`DispatchModel`] as C text.
pub struct Emitter<'a> {
    pub(super) model: &'a DispatchModel<'a>,
    pub(super) profile: &'a Profile,
    /// Output buffer
    pub(super) output: String,
}

impl<'a> Emitter<'a> {
    pub fn new(model: &'a DispatchModel<'a>) -> Self {
        Self {
            model,
            profile: model.profile(),
            output: String::new(),
        }
    }

    pub fn emit(self, kind: ArtifactKind) -> String {
        match kind {
            ArtifactKind::Header => self.emit_header(),
            ArtifactKind::Source => self.emit_source(),
        }
    }

    pub fn emit_header(mut self) -> String {
        let model = self.model;
        let profile = self.profile;
        let guard = &profile.header_guard;

        self.output
            .push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
        self.output
            .push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
        self.emit_includes(&profile.header_includes);

        self.output.push_str("enum {\n");
        for func in model.functions() {
            let entry = format!("    {},\n", profile.enum_entry(func.name()));
            self.emit_guarded(func, &entry);
        }
        self.output
            .push_str(&format!("    {}\n", profile.enum_count()));
        self.output.push_str("};\n");

        let mut first = true;
        for func in model.functions().iter().filter(|f| f.policy.in_header) {
            if first {
                self.output.push('\n');
                first = false;
            }
            let prototype = format!("{};\n", self.declarator(func));
            self.emit_guarded(func, &prototype);
        }

        self.output
            .push_str("\n#ifdef __cplusplus\n}\n#endif\n");
        self.output.push_str(&format!("#endif // {guard}\n"));

        tracing::debug!(functions = model.len(), "emitted header");
        self.output
    }

    pub fn emit_source(mut self) -> String {
        let model = self.model;
        self.emit_includes(&model.profile().source_includes);

        let mut stubs = 0;
        for func in model.functions().iter().filter(|f| f.policy.route.has_stub()) {
            self.guard_begin(func);
            self.emit_stub(func);
            self.guard_end(func);
            self.output.push('\n');
            stubs += 1;
        }

        self.emit_names_table();
        self.emit_functions_table();

        tracing::debug!(functions = model.len(), stubs, "emitted source");
        self.output
    }

    fn emit_includes(&mut self, includes: &[String]) {
        if includes.is_empty() {
            return;
        }
        for include in includes {
            self.output.push_str(&format!("#include {include}\n"));
        }
        self.output.push('\n');
    }

    fn emit_names_table(&mut self) {
        let model = self.model;
        self.output.push_str(&format!(
            "const char * const {}[{}] = {{\n",
            self.profile.names_table,
            self.table_size()
        ));
        for func in model.functions() {
            let entry = format!("    \"{}\",\n", func.name());
            self.emit_guarded(func, &entry);
        }
        self.emit_table_end();
    }

    fn emit_functions_table(&mut self) {
        let model = self.model;
        let profile = self.profile;
        let ptr_type = &profile.function_pointer_type;
        self.output.push_str(&format!(
            "const {ptr_type} {}[{}] = {{\n",
            profile.functions_table,
            self.table_size()
        ));
        for func in model.functions() {
            let entry = if matches!(func.policy.route, Route::None) {
                format!("    {}, // {}\n", profile.null_literal, func.name())
            } else {
                format!("    ({ptr_type}) {},\n", func.symbol())
            };
            self.emit_guarded(func, &entry);
        }
        self.emit_table_end();
    }

    fn emit_table_end(&mut self) {
        if self.profile.null_terminated_tables {
            self.output
                .push_str(&format!("    {}\n", self.profile.null_literal));
        }
        self.output.push_str("};\n");
    }

    fn table_size(&self) -> String {
        let count = self.profile.enum_count();
        if self.profile.null_terminated_tables {
            format!("{count} + 1")
        } else {
            count
        }
    }

    /// `RET [CC ]SYMBOL(ARGS)`, shared by prototypes and stub definitions.
    pub(super) fn declarator(&self, func: &ResolvedFunction<'_>) -> String {
        let sig = func.signature;
        format!(
            "{} {}{}({})",
            sig.return_type,
            self.calling_convention(),
            func.symbol(),
            sig.decl_args()
        )
    }

    /// Calling convention followed by a space, or nothing.
    pub(super) fn calling_convention(&self) -> String {
        match &self.profile.calling_convention {
            Some(cc) => format!("{cc} "),
            None => String::new(),
        }
    }

    pub(super) fn emit_guarded(&mut self, func: &ResolvedFunction<'_>, text: &str) {
        self.guard_begin(func);
        self.output.push_str(text);
        self.guard_end(func);
    }

    fn guard_begin(&mut self, func: &ResolvedFunction<'_>) {
        if let Some(guard) = &func.policy.guard {
            self.output
                .push_str(&format!("#if {}\n", guard.predicate()));
        }
    }

    fn guard_end(&mut self, func: &ResolvedFunction<'_>) {
        if func.policy.guard.is_some() {
            self.output.push_str("#endif\n");
        }
    }
}
