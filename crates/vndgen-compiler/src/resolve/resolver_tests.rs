use super::{AddMapping, Linkage, ObjectKind, ParamRef, Protocol, RemoveMapping, Resolver, Route};
use crate::policy::{MappingKind, Method, ParamSpec, RawPolicy};
use crate::resolve::resolve;
use crate::test_utils::{create_context, entry, sig};
use crate::{ConsistencyError, Error, InputError, Profile, ReferenceError};

fn make_context_current() -> vndgen_core::FunctionSignature {
    sig(
        "glXMakeContextCurrent",
        "Bool",
        &[
            ("Display *", "dpy"),
            ("GLXDrawable", "draw"),
            ("GLXDrawable", "read"),
            ("GLXContext", "ctx"),
        ],
    )
}

#[test]
fn visual_info_becomes_screen_lookup() {
    let raw = RawPolicy {
        add_mapping: Some(MappingKind::Context),
        ..entry("glXCreateContext", Method::VisualInfo)
    };
    let policy = resolve(&create_context(), &raw).unwrap();

    assert_eq!(policy.method(), Method::Screen);
    assert_eq!(
        policy.route,
        Route::Screen {
            key: ParamRef::raw("(vis)->screen")
        }
    );
    assert_eq!(policy.adds_mapping, Some(AddMapping::Context));
    assert_eq!(policy.display, Some(ParamRef::param(0, "dpy")));
    assert_eq!(policy.default_return.as_deref(), Some("NULL"));
}

#[test]
fn implicit_context_key_picks_first_context_param() {
    let policy = resolve(&make_context_current(), &entry("f", Method::Context)).unwrap();
    assert_eq!(
        policy.route,
        Route::Context {
            key: ParamRef::param(3, "ctx"),
            protocol: Protocol::default(),
        }
    );
    assert_eq!(policy.default_return.as_deref(), Some("False"));
}

#[test]
fn implicit_drawable_key_picks_first_match() {
    let policy = resolve(&make_context_current(), &entry("f", Method::Drawable)).unwrap();
    assert_eq!(policy.key(), Some(&ParamRef::param(1, "draw")));
}

#[test]
fn explicit_key_by_index_string() {
    let raw = RawPolicy {
        key: Some("0".into()),
        ..entry("f", Method::Context)
    };
    let policy = resolve(&make_context_current(), &raw).unwrap();
    assert_eq!(policy.key(), Some(&ParamRef::param(0, "dpy")));
}

#[test]
fn explicit_key_by_integer_and_name() {
    let by_index = RawPolicy {
        key: Some(ParamSpec::Index(2)),
        ..entry("f", Method::Drawable)
    };
    let by_name = RawPolicy {
        key: Some("read".into()),
        ..entry("f", Method::Drawable)
    };
    let func = make_context_current();
    assert_eq!(
        resolve(&func, &by_index).unwrap().key(),
        Some(&ParamRef::param(2, "read"))
    );
    assert_eq!(
        resolve(&func, &by_name).unwrap().key(),
        Some(&ParamRef::param(2, "read"))
    );
}

#[test]
fn parenthesized_key_is_kept_verbatim() {
    let raw = RawPolicy {
        key: Some("(vis->screen)".into()),
        ..entry("glXCreateContext", Method::Screen)
    };
    let policy = resolve(&create_context(), &raw).unwrap();
    assert_eq!(policy.key(), Some(&ParamRef::raw("(vis->screen)")));
}

#[test]
fn unknown_key_name_is_a_reference_error() {
    let raw = RawPolicy {
        key: Some("nope".into()),
        ..entry("glXCreateContext", Method::Context)
    };
    let err = resolve(&create_context(), &raw).unwrap_err();
    assert_eq!(
        err,
        Error::Reference(ReferenceError::UnknownParameter {
            function: "glXCreateContext".into(),
            field: "key",
            spec: "nope".into(),
        })
    );
}

#[test]
fn out_of_range_index_is_a_reference_error() {
    let raw = RawPolicy {
        key: Some(ParamSpec::Index(9)),
        ..entry("glXCreateContext", Method::Context)
    };
    let err = resolve(&create_context(), &raw).unwrap_err();
    assert!(matches!(
        err,
        Error::Reference(ReferenceError::UnknownParameter { ref spec, .. }) if spec == "9"
    ));
}

#[test]
fn no_key_candidate_names_function_and_method() {
    let func = sig("glXFoo", "void", &[("Display *", "dpy"), ("int", "x")]);
    let err = resolve(&func, &entry("glXFoo", Method::Drawable)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "function glXFoo: no parameter can serve as the `drawable` key"
    );

    let err = resolve(&func, &entry("glXFoo", Method::Screen)).unwrap_err();
    assert!(matches!(
        err,
        Error::Reference(ReferenceError::NoKeyCandidate {
            method: Method::Screen,
            ..
        })
    ));
}

#[test]
fn screen_key_defaults_to_param_named_screen() {
    let func = sig(
        "glXChooseFBConfig",
        "GLXFBConfig *",
        &[
            ("Display *", "dpy"),
            ("int", "screen"),
            ("const int *", "attrib_list"),
            ("int *", "nelements"),
        ],
    );
    let policy = resolve(&func, &entry("glXChooseFBConfig", Method::Screen)).unwrap();
    assert_eq!(
        policy.route,
        Route::Screen {
            key: ParamRef::param(1, "screen")
        }
    );
}

#[test]
fn current_has_no_key_and_needs_no_display() {
    let func = sig("glXSwapIntervalSGI", "int", &[("int", "interval")]);
    let policy = resolve(&func, &entry("glXSwapIntervalSGI", Method::Current)).unwrap();
    assert_eq!(policy.route, Route::Current);
    assert!(policy.key().is_none());
    assert!(policy.display.is_none());
    assert_eq!(policy.default_return.as_deref(), Some("0"));
}

#[test]
fn none_and_custom_resolve_only_linkage_and_guard() {
    let func = sig("glXGetProcAddress", "__GLXextFuncPtr", &[("const GLubyte *", "procName")]);
    let raw = RawPolicy {
        extension: Some("GLX_ARB_get_proc_address".into()),
        prefix: Some("dispatch_".into()),
        key: Some("missing".into()),
        ..entry("glXGetProcAddress", Method::None)
    };
    let policy = resolve(&func, &raw).unwrap();
    assert_eq!(policy.route, Route::None);
    assert_eq!(
        policy.guard.as_ref().map(|g| g.predicate()),
        Some("defined(GLX_ARB_get_proc_address)")
    );
    assert_eq!(policy.name_prefix, "dispatch_");
    assert!(policy.default_return.is_none());
    assert!(!policy.in_header);

    let custom = resolve(&func, &entry("glXGetProcAddress", Method::Custom)).unwrap();
    assert_eq!(custom.route, Route::Custom);
    assert!(custom.in_header);
}

#[test]
fn explicit_retval_wins() {
    let raw = RawPolicy {
        retval: Some("GLX_BAD_CONTEXT".into()),
        ..entry("glXQueryContext", Method::Context)
    };
    let func = sig(
        "glXQueryContext",
        "int",
        &[("Display *", "dpy"), ("GLXContext", "ctx")],
    );
    let policy = resolve(&func, &raw).unwrap();
    assert_eq!(policy.default_return.as_deref(), Some("GLX_BAD_CONTEXT"));
}

#[test]
fn void_function_has_no_default_return() {
    let func = sig(
        "glXDestroyContext",
        "void",
        &[("Display *", "dpy"), ("GLXContext", "ctx")],
    );
    let policy = resolve(&func, &entry("glXDestroyContext", Method::Context)).unwrap();
    assert!(policy.default_return.is_none());
}

#[test]
fn resolver_uses_profile_sentinels() {
    let func = sig("eglCreateImage", "EGLImage", &[("EGLDisplay", "dpy")]);
    let profile = Profile::egl().sentinel("EGLImage", "EGL_NO_IMAGE");
    let policy = Resolver::for_profile(&profile)
        .resolve(&func, &entry("eglCreateImage", Method::Display))
        .unwrap();
    assert_eq!(policy.default_return.as_deref(), Some("EGL_NO_IMAGE"));

    assert_eq!(
        resolve(&func, &entry("eglCreateImage", Method::Display))
            .unwrap()
            .default_return
            .as_deref(),
        Some("0")
    );
}

#[test]
fn display_route_uses_key_as_connection() {
    let func = sig(
        "eglSwapBuffersWithDamageEXT",
        "EGLBoolean",
        &[("EGLDisplay", "dpy"), ("EGLSurface", "surface")],
    );
    let policy = resolve(&func, &entry("eglSwapBuffersWithDamageEXT", Method::Display)).unwrap();
    assert_eq!(
        policy.route,
        Route::Display {
            key: ParamRef::param(0, "dpy")
        }
    );
    assert_eq!(policy.display, Some(ParamRef::param(0, "dpy")));
    assert_eq!(policy.default_return.as_deref(), Some("EGL_FALSE"));
}

#[test]
fn static_and_public_conflict() {
    let raw = RawPolicy {
        is_static: Some(true),
        public: Some(true),
        ..entry("glXCreateContext", Method::VisualInfo)
    };
    let err = resolve(&create_context(), &raw).unwrap_err();
    assert_eq!(
        err,
        Error::PolicyConsistency(ConsistencyError::StaticAndPublic {
            function: "glXCreateContext".into()
        })
    );
}

#[test]
fn linkage_and_header_defaults() {
    let func = create_context();
    let plain = resolve(&func, &entry("glXCreateContext", Method::VisualInfo)).unwrap();
    assert_eq!(plain.linkage, Linkage::Default);
    assert!(plain.in_header);
    assert_eq!(plain.name_prefix, "");

    let hidden = RawPolicy {
        is_static: Some(true),
        ..entry("glXCreateContext", Method::VisualInfo)
    };
    let hidden = resolve(&func, &hidden).unwrap();
    assert_eq!(hidden.linkage, Linkage::Static);
    assert!(!hidden.in_header);

    let exported = RawPolicy {
        public: Some(true),
        inheader: Some(false),
        ..entry("glXCreateContext", Method::VisualInfo)
    };
    let exported = resolve(&func, &exported).unwrap();
    assert_eq!(exported.linkage, Linkage::Public);
    assert!(!exported.in_header);
}

#[test]
fn invalid_extension_name() {
    let raw = RawPolicy {
        extension: Some("GLX foo".into()),
        ..entry("glXCreateContext", Method::VisualInfo)
    };
    let err = resolve(&create_context(), &raw).unwrap_err();
    assert!(matches!(
        err,
        Error::InputParse(InputError::PolicyField {
            field: "extension",
            ..
        })
    ));
}

#[test]
fn drawable_opcode_needs_error_code() {
    let func = sig(
        "glXSwapIntervalEXT",
        "void",
        &[("Display *", "dpy"), ("GLXDrawable", "drawable"), ("int", "interval")],
    );
    let raw = RawPolicy {
        opcode: Some("X_GLXvop_SwapIntervalEXT".into()),
        ..entry("glXSwapIntervalEXT", Method::Drawable)
    };
    assert_eq!(
        resolve(&func, &raw).unwrap_err(),
        Error::PolicyConsistency(ConsistencyError::MissingErrorCode {
            function: "glXSwapIntervalEXT".into()
        })
    );

    let raw = RawPolicy {
        error: Some("GLXBadDrawable".into()),
        ..raw
    };
    let policy = resolve(&func, &raw).unwrap();
    assert_eq!(
        policy.route,
        Route::Drawable {
            key: ParamRef::param(1, "drawable"),
            protocol: Protocol {
                opcode: "X_GLXvop_SwapIntervalEXT".into(),
                error: "GLXBadDrawable".into(),
            },
        }
    );
}

#[test]
fn context_opcode_without_error_is_fine() {
    let raw = RawPolicy {
        opcode: Some("X_GLXQueryContext".into()),
        ..entry("glXQueryContext", Method::Context)
    };
    let func = sig(
        "glXQueryContext",
        "int",
        &[("Display *", "dpy"), ("GLXContext", "ctx")],
    );
    let policy = resolve(&func, &raw).unwrap();
    let Route::Context { protocol, .. } = policy.route else {
        panic!("expected context route");
    };
    assert_eq!(protocol.opcode, "X_GLXQueryContext");
    assert_eq!(protocol.error, "-1");
}

#[test]
fn config_list_needs_count() {
    let func = sig(
        "glXGetFBConfigs",
        "GLXFBConfig *",
        &[("Display *", "dpy"), ("int", "screen"), ("int *", "nelements")],
    );
    let raw = RawPolicy {
        add_mapping: Some(MappingKind::ConfigList),
        ..entry("glXGetFBConfigs", Method::Screen)
    };
    assert_eq!(
        resolve(&func, &raw).unwrap_err(),
        Error::PolicyConsistency(ConsistencyError::MissingCount {
            function: "glXGetFBConfigs".into()
        })
    );

    let raw = RawPolicy {
        count: Some("(*nelements)".into()),
        ..raw
    };
    let policy = resolve(&func, &raw).unwrap();
    assert_eq!(
        policy.adds_mapping,
        Some(AddMapping::ConfigList {
            count: ParamRef::raw("(*nelements)")
        })
    );
}

#[test]
fn mapping_on_void_return_is_rejected() {
    let func = sig(
        "glXDestroyContext",
        "void",
        &[("Display *", "dpy"), ("GLXContext", "ctx")],
    );
    let raw = RawPolicy {
        add_mapping: Some(MappingKind::Context),
        ..entry("glXDestroyContext", Method::Context)
    };
    assert!(matches!(
        resolve(&func, &raw).unwrap_err(),
        Error::PolicyConsistency(ConsistencyError::MappingWithoutReturn { .. })
    ));
}

#[test]
fn removal_defaults_to_matching_dispatch_key() {
    let func = sig(
        "glXDestroyContext",
        "void",
        &[("Display *", "dpy"), ("GLXContext", "ctx")],
    );
    let raw = RawPolicy {
        remove_mapping: Some(MappingKind::Context),
        ..entry("glXDestroyContext", Method::Context)
    };
    let policy = resolve(&func, &raw).unwrap();
    assert_eq!(
        policy.removes_mapping,
        Some(RemoveMapping {
            kind: ObjectKind::Context,
            key: ParamRef::param(1, "ctx"),
        })
    );
}

#[test]
fn removal_of_other_kind_needs_explicit_key() {
    let func = sig(
        "glXDestroyWindow",
        "void",
        &[("Display *", "dpy"), ("GLXWindow", "win")],
    );
    let raw = RawPolicy {
        remove_mapping: Some(MappingKind::Drawable),
        ..entry("glXDestroyWindow", Method::Screen)
    };
    let raw = RawPolicy {
        key: Some("(DefaultScreen(dpy))".into()),
        ..raw
    };
    assert_eq!(
        resolve(&func, &raw).unwrap_err(),
        Error::PolicyConsistency(ConsistencyError::ImplicitRemovalKey {
            function: "glXDestroyWindow".into(),
            kind: MappingKind::Drawable,
            method: Method::Screen,
        })
    );

    let raw = RawPolicy {
        remove_key: Some("win".into()),
        ..raw
    };
    let policy = resolve(&func, &raw).unwrap();
    assert_eq!(
        policy.removes_mapping,
        Some(RemoveMapping {
            kind: ObjectKind::Drawable,
            key: ParamRef::param(1, "win"),
        })
    );
}

#[test]
fn config_list_removal_is_invalid() {
    let func = sig(
        "glXDestroyContext",
        "void",
        &[("Display *", "dpy"), ("GLXContext", "ctx")],
    );
    let raw = RawPolicy {
        remove_mapping: Some(MappingKind::ConfigList),
        ..entry("glXDestroyContext", Method::Context)
    };
    assert!(matches!(
        resolve(&func, &raw).unwrap_err(),
        Error::PolicyConsistency(ConsistencyError::InvalidRemoval {
            kind: MappingKind::ConfigList,
            ..
        })
    ));
}

#[test]
fn missing_display_is_reported() {
    let func = sig("glXFoo", "void", &[("GLXDrawable", "draw")]);
    assert_eq!(
        resolve(&func, &entry("glXFoo", Method::Drawable)).unwrap_err(),
        Error::Reference(ReferenceError::MissingDisplay {
            function: "glXFoo".into()
        })
    );
}

#[test]
fn context_lookup_alone_needs_no_display() {
    let func = sig("glXGetContextIDEXT", "GLXContextID", &[("const GLXContext", "ctx")]);
    let policy = resolve(&func, &entry("glXGetContextIDEXT", Method::Context)).unwrap();
    assert!(policy.display.is_none());
}

#[test]
fn mapping_update_needs_display_for_keyless_lookups() {
    let func = sig("glXFooCreateCtx", "GLXContext", &[("GLXContext", "share")]);
    for method in [Method::Current, Method::Context] {
        let raw = RawPolicy {
            add_mapping: Some(MappingKind::Context),
            ..entry("glXFooCreateCtx", method)
        };
        assert_eq!(
            resolve(&func, &raw).unwrap_err(),
            Error::Reference(ReferenceError::MissingDisplay {
                function: "glXFooCreateCtx".into()
            }),
            "{method}"
        );
    }
}

#[test]
fn context_removal_takes_display_from_signature() {
    let func = sig(
        "glXDestroyContext",
        "void",
        &[("Display *", "dpy"), ("GLXContext", "ctx")],
    );
    let raw = RawPolicy {
        remove_mapping: Some(MappingKind::Context),
        ..entry("glXDestroyContext", Method::Current)
    };
    let raw = RawPolicy {
        remove_key: Some("ctx".into()),
        ..raw
    };
    let policy = resolve(&func, &raw).unwrap();
    assert_eq!(policy.display, Some(ParamRef::param(0, "dpy")));
}

#[test]
fn explicit_display_reference() {
    let func = sig(
        "glXFoo",
        "void",
        &[("GLXDrawable", "draw"), ("struct _XDisplay *", "conn")],
    );
    let raw = RawPolicy {
        display: Some("conn".into()),
        ..entry("glXFoo", Method::Drawable)
    };
    let policy = resolve(&func, &raw).unwrap();
    assert_eq!(policy.display, Some(ParamRef::param(1, "conn")));
}
