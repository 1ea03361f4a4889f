//! Renderer environment contract
//!
//! Maps a renderer id chosen by the user to the variables the native graphics
//! loader reads. The plan carries them through untouched.

use crate::error::LaunchError;

pub const KNOWN_RENDERERS: &[&str] = &[
    "native",
    "gl4es",
    "gl4es+angle",
    "mobileglues",
    "angle",
    "zink",
    "dxvk",
];

const ANGLE_EGL: &str = "libEGL_angle.so";
const ANGLE_GLES: &str = "libGLESv2_angle.so";

/// Ids written by older settings files
fn canonical_id(id: &str) -> &str {
    match id {
        "opengles3" | "vulkan" => "native",
        "opengl_gl4es" => "gl4es",
        other => other,
    }
}

fn set(pairs: &[(&str, &str)]) -> Vec<(String, Option<String>)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect()
}

fn gl4es_base() -> Vec<(String, Option<String>)> {
    set(&[
        ("RALCORE_RENDERER", "gl4es"),
        ("LIBGL_ES", "3"),
        ("LIBGL_MIPMAP", "3"),
        ("LIBGL_NORMALIZE", "1"),
        ("LIBGL_NOINTOVLHACK", "1"),
        ("LIBGL_NOERROR", "1"),
    ])
}

/// Variables for `id`; `None` values are to be unset
pub fn renderer_env(id: &str) -> Result<Vec<(String, Option<String>)>, LaunchError> {
    let env = match canonical_id(id.trim()) {
        "native" => Vec::new(),
        "gl4es" => {
            let mut env = gl4es_base();
            env.push(("LIBGL_EGL".to_string(), None));
            env.push(("LIBGL_GLES".to_string(), None));
            env
        }
        "gl4es+angle" => {
            let mut env = gl4es_base();
            env.extend(set(&[("LIBGL_EGL", ANGLE_EGL), ("LIBGL_GLES", ANGLE_GLES)]));
            env
        }
        "mobileglues" => set(&[
            ("RALCORE_RENDERER", "mobileglues"),
            ("FNA3D_OPENGL_DRIVER", "mobileglues"),
            ("MOBILEGLUES_GLES_VERSION", "3.2"),
            ("FNA3D_MOJOSHADER_PROFILE", "glsles3"),
        ]),
        "angle" => set(&[("RALCORE_EGL", ANGLE_EGL), ("LIBGL_GLES", ANGLE_GLES)]),
        "zink" => set(&[
            ("RALCORE_RENDERER", "vulkan_zink"),
            ("GALLIUM_DRIVER", "zink"),
            ("MESA_LOADER_DRIVER_OVERRIDE", "zink"),
            ("MESA_GL_VERSION_OVERRIDE", "4.6"),
            ("MESA_GLSL_VERSION_OVERRIDE", "460"),
            ("force_glsl_extensions_warn", "true"),
            ("allow_higher_compat_version", "true"),
            ("allow_glsl_extension_directive_midshader", "true"),
            ("ZINK_DESCRIPTORS", "auto"),
        ]),
        "dxvk" => set(&[
            ("RALCORE_RENDERER", "dxvk"),
            ("FNA3D_FORCE_DRIVER", "D3D11"),
            ("DXVK_WSI_DRIVER", "SDL2"),
            ("DXVK_LOG_LEVEL", "info"),
        ]),
        other => {
            return Err(LaunchError::ParameterSet(format!(
                "unknown renderer '{}' (expected one of {})",
                other,
                KNOWN_RENDERERS.join(", ")
            )));
        }
    };
    Ok(env)
}
