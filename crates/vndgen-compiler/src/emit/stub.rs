//! Dispatch stub bodies.

use super::Emitter;
use crate::model::ResolvedFunction;
use crate::resolve::{AddMapping, DispatchPolicy, Linkage, Route};

impl Emitter<'_> {
    /// One stub: find the vendor, fetch its slot, call through, update mappings.
    pub(super) fn emit_stub(&mut self, func: &ResolvedFunction<'_>) {
        let sig = func.signature;
        let policy = &func.policy;
        let name = &sig.name;
        let ret_type = &sig.return_type;
        let args = sig.decl_args();
        let null = &self.profile.null_literal;

        let linkage = match policy.linkage {
            Linkage::Default => String::new(),
            Linkage::Static => "static ".to_string(),
            Linkage::Public => format!("{} ", self.profile.export_macro),
        };

        let mut text = format!("{linkage}{}\n{{\n", self.declarator(func));
        text.push_str(&format!(
            "    typedef {ret_type} {}(* _pfn_{name})({args});\n",
            self.calling_convention()
        ));
        text.push_str(&format!("    {} *_vendor;\n", self.profile.vendor_type));
        text.push_str(&format!("    _pfn_{name} _ptr_{name};\n"));
        if let Some(default) = &policy.default_return {
            text.push_str(&format!("    {ret_type} _ret = {default};\n"));
        }
        text.push('\n');

        text.push_str(&format!("    _vendor = {};\n", self.lookup_call(func)));
        text.push_str(&format!("    if (_vendor != {null}) {{\n"));
        text.push_str(&format!("        _ptr_{name} = (_pfn_{name})\n"));
        text.push_str(&format!(
            "            {}(_vendor, {});\n",
            self.profile.runtime.fetch,
            self.slot_expr(name)
        ));
        text.push_str(&format!("        if (_ptr_{name} != {null}) {{\n"));

        let assign = if policy.default_return.is_some() {
            "_ret = "
        } else {
            ""
        };
        text.push_str(&format!(
            "            {assign}(*_ptr_{name})({});\n",
            sig.call_args()
        ));
        for line in self.mapping_calls(policy) {
            text.push_str(&format!("            {line};\n"));
        }

        text.push_str("        }\n    }\n");
        if policy.default_return.is_some() {
            text.push_str("    return _ret;\n");
        }
        text.push_str("}\n");

        self.output.push_str(&text);
    }

    /// Argument for the runtime fetch call: the enum entry, through the
    /// profile's index table when it has one.
    fn slot_expr(&self, name: &str) -> String {
        let entry = self.profile.enum_entry(name);
        match &self.profile.slot_indices {
            Some(table) => format!("{table}[{entry}]"),
            None => entry,
        }
    }

    fn display_expr(&self, policy: &DispatchPolicy) -> String {
        match &policy.display {
            Some(display) => display.to_string(),
            None => self.profile.null_literal.clone(),
        }
    }

    fn lookup_call(&self, func: &ResolvedFunction<'_>) -> String {
        let policy = &func.policy;
        // Missing runtime entries were rejected when the model was built.
        let entry = self
            .profile
            .runtime
            .lookup(&policy.route)
            .and_then(|(_, entry)| entry)
            .unwrap_or_default();
        let display = self.display_expr(policy);

        match &policy.route {
            Route::None | Route::Custom => String::new(),
            Route::Current => format!("{entry}()"),
            Route::Display { key } | Route::Device { key } => {
                format!("{entry}({key}, {})", self.slot_expr(func.name()))
            }
            Route::Screen { key } => format!("{entry}({display}, {key})"),
            Route::Drawable { key, protocol } => format!(
                "{entry}({display}, {key}, {}, {})",
                protocol.opcode, protocol.error
            ),
            Route::Context { key, protocol } | Route::Config { key, protocol } => {
                format!("{entry}({display}, {key}, {})", protocol.opcode)
            }
        }
    }

    /// Statements run after a successful call.
    fn mapping_calls(&self, policy: &DispatchPolicy) -> Vec<String> {
        let runtime = &self.profile.runtime;
        let display = self.display_expr(policy);
        let mut calls = Vec::new();

        if let Some(mapping) = &policy.adds_mapping {
            let entry = runtime.add(mapping).1.unwrap_or_default();
            calls.push(match mapping {
                // Drawables are recorded, not rebound.
                AddMapping::Drawable => format!("{entry}({display}, _ret, _vendor)"),
                AddMapping::Context | AddMapping::Config => {
                    format!("_ret = {entry}({display}, _ret, _vendor)")
                }
                AddMapping::ConfigList { count } => {
                    format!("_ret = {entry}({display}, _ret, {count}, _vendor)")
                }
            });
        }

        if let Some(removal) = &policy.removes_mapping {
            let entry = runtime.remove(removal.kind).1.unwrap_or_default();
            calls.push(format!("{entry}({display}, {})", removal.key));
        }

        calls
    }
}
