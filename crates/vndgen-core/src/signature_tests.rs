use crate::{FunctionSignature, Param};

fn create_context() -> FunctionSignature {
    FunctionSignature::new(
        "glXCreateContext",
        "GLXContext",
        vec![
            Param::new("Display *", "dpy"),
            Param::new("XVisualInfo *", "vis"),
            Param::new("GLXContext", "shareList"),
            Param::new("Bool", "direct"),
        ],
    )
}

#[test]
fn declaration_joins_pointer_types() {
    assert_eq!(Param::new("Display *", "dpy").declaration(), "Display *dpy");
    assert_eq!(Param::new("Bool", "direct").declaration(), "Bool direct");
}

#[test]
fn decl_and_call_args() {
    let func = create_context();
    assert_eq!(
        func.decl_args(),
        "Display *dpy, XVisualInfo *vis, GLXContext shareList, Bool direct"
    );
    assert_eq!(func.call_args(), "dpy, vis, shareList, direct");
}

#[test]
fn empty_parameter_list_is_void() {
    let func = FunctionSignature::new("glXGetCurrentDisplayEXT", "Display *", vec![]);
    assert_eq!(func.decl_args(), "void");
    assert_eq!(func.call_args(), "");
    assert!(func.has_return());
}

#[test]
fn void_return() {
    let func = FunctionSignature::new("glXSwapIntervalEXT", "void", vec![]);
    assert!(!func.has_return());
}

#[test]
fn param_index_by_type_takes_first_match() {
    let func = FunctionSignature::new(
        "f",
        "void",
        vec![
            Param::new("int", "a"),
            Param::new("GLXDrawable", "draw"),
            Param::new("GLXDrawable", "read"),
        ],
    );
    assert_eq!(func.param_index_by_type(&["GLXWindow", "GLXDrawable"]), Some(1));
    assert_eq!(func.param_index_by_type(&["GLXContext"]), None);
    assert_eq!(func.param_index("read"), Some(2));
    assert_eq!(func.param_index("ctx"), None);
}
