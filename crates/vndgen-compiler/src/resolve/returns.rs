//! Parameter type sets and default return values.

use indexmap::IndexMap;

use vndgen_core::types::is_pointer;

use crate::policy::Method;

pub const DRAWABLE_TYPES: &[&str] = &[
    "GLXDrawable",
    "GLXWindow",
    "GLXPixmap",
    "GLXPbuffer",
    "GLXPbufferSGIX",
];
pub const CONTEXT_TYPES: &[&str] = &["GLXContext", "const GLXContext"];
pub const CONFIG_TYPES: &[&str] = &["GLXFBConfig", "GLXFBConfigSGIX"];
pub const VISUAL_INFO_TYPES: &[&str] = &["XVisualInfo *", "const XVisualInfo *"];
pub const DISPLAY_TYPES: &[&str] = &["EGLDisplay"];
pub const DEVICE_TYPES: &[&str] = &["EGLDeviceEXT"];
pub const CONNECTION_TYPES: &[&str] = &["Display *"];

/// Server-side IDs that are not drawables but share the `None` sentinel.
const XID_TYPES: &[&str] = &["XID", "GLXFBConfigID", "GLXContextID"];

/// Types a method's implicit key is searched among.
///
/// `screen` is matched by name, not type, so it has no set.
pub fn key_types(method: Method) -> Option<&'static [&'static str]> {
    match method {
        Method::Drawable => Some(DRAWABLE_TYPES),
        Method::Context => Some(CONTEXT_TYPES),
        Method::Config => Some(CONFIG_TYPES),
        Method::VisualInfo => Some(VISUAL_INFO_TYPES),
        Method::Display => Some(DISPLAY_TYPES),
        Method::Device => Some(DEVICE_TYPES),
        Method::None | Method::Custom | Method::Current | Method::Screen => None,
    }
}

/// Literal a stub returns when no vendor handles the call.
///
/// `extra` entries are consulted first, keyed by canonical type.
pub fn default_return(return_type: &str, extra: &IndexMap<String, String>) -> String {
    if let Some(literal) = extra.get(return_type) {
        return literal.clone();
    }
    if is_pointer(return_type) {
        return "NULL".to_string();
    }

    let literal = match return_type {
        "GLXContext" => "NULL",
        t if CONFIG_TYPES.contains(&t) => "NULL",
        t if DRAWABLE_TYPES.contains(&t) || XID_TYPES.contains(&t) => "None",
        "EGLDisplay" => "EGL_NO_DISPLAY",
        "EGLContext" => "EGL_NO_CONTEXT",
        "EGLSurface" => "EGL_NO_SURFACE",
        "EGLBoolean" => "EGL_FALSE",
        "GLboolean" => "GL_FALSE",
        "Bool" => "False",
        _ => "0",
    };
    literal.to_string()
}
