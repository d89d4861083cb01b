//! Test fixtures and helpers.

use vndgen_core::{Catalog, FunctionSignature, Param};

use crate::policy::{Method, RawPolicy};
use crate::{DispatchModel, PolicyTable, Profile};

/// Signature from `(type, name)` pairs.
pub fn sig(name: &str, ret: &str, params: &[(&str, &str)]) -> FunctionSignature {
    FunctionSignature::new(
        name,
        ret,
        params.iter().map(|(ty, n)| Param::new(*ty, *n)).collect(),
    )
}

pub fn create_context() -> FunctionSignature {
    sig(
        "glXCreateContext",
        "GLXContext",
        &[
            ("Display *", "dpy"),
            ("XVisualInfo *", "vis"),
            ("GLXContext", "shareList"),
            ("Bool", "direct"),
        ],
    )
}

/// A handful of real GLX entry points.
pub fn glx_catalog() -> Catalog {
    Catalog::from_signatures([
        create_context(),
        sig(
            "glXDestroyContext",
            "void",
            &[("Display *", "dpy"), ("GLXContext", "ctx")],
        ),
        sig(
            "glXMakeContextCurrent",
            "Bool",
            &[
                ("Display *", "dpy"),
                ("GLXDrawable", "draw"),
                ("GLXDrawable", "read"),
                ("GLXContext", "ctx"),
            ],
        ),
        sig(
            "glXGetFBConfigs",
            "GLXFBConfig *",
            &[("Display *", "dpy"), ("int", "screen"), ("int *", "nelements")],
        ),
        sig(
            "glXCreateWindow",
            "GLXWindow",
            &[
                ("Display *", "dpy"),
                ("GLXFBConfig", "config"),
                ("Window", "win"),
                ("const int *", "attrib_list"),
            ],
        ),
        sig(
            "glXDestroyWindow",
            "void",
            &[("Display *", "dpy"), ("GLXWindow", "win")],
        ),
        sig(
            "glXQueryContext",
            "int",
            &[
                ("Display *", "dpy"),
                ("GLXContext", "ctx"),
                ("int", "attribute"),
                ("int *", "value"),
            ],
        ),
        sig("glXSwapIntervalSGI", "int", &[("int", "interval")]),
        sig("glXGetCurrentContext", "GLXContext", &[]),
        sig(
            "glXSwapIntervalEXT",
            "void",
            &[("Display *", "dpy"), ("GLXDrawable", "drawable"), ("int", "interval")],
        ),
    ])
}

/// A few EGL entry points.
pub fn egl_catalog() -> Catalog {
    Catalog::from_signatures([
        sig(
            "eglQueryDeviceAttribEXT",
            "EGLBoolean",
            &[
                ("EGLDeviceEXT", "device"),
                ("EGLint", "attribute"),
                ("EGLAttrib *", "value"),
            ],
        ),
        sig(
            "eglSwapBuffersWithDamageEXT",
            "EGLBoolean",
            &[
                ("EGLDisplay", "dpy"),
                ("EGLSurface", "surface"),
                ("const EGLint *", "rects"),
                ("EGLint", "n_rects"),
            ],
        ),
        sig("eglGetCurrentSurface", "EGLSurface", &[("EGLint", "readdraw")]),
    ])
}

/// Shorthand for a raw entry with just a name and method.
pub fn entry(name: &str, method: Method) -> RawPolicy {
    RawPolicy::new(name, method)
}

/// Resolve `entries` against `catalog` with `profile`, panicking on error.
pub fn build_model<'a>(
    catalog: &'a Catalog,
    entries: Vec<RawPolicy>,
    profile: Profile,
) -> DispatchModel<'a> {
    let table = PolicyTable::from_entries(entries).expect("valid policy table");
    DispatchModel::build(catalog, &table, profile).expect("model should resolve")
}
