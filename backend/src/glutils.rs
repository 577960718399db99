use gl::{types::*, *};
use std::ffi::CStr;

use crate::error::BackendInitError;

pub fn check_gl_err() -> Result<(), BackendInitError> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return Ok(());
    }
    Err(BackendInitError::Gl(err))
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn log_opengl_info() {
    log::debug!("GL_VENDOR = {}", gl_string(VENDOR));
    log::debug!("GL_RENDERER = {}", gl_string(RENDERER));
    log::debug!("GL_VERSION = {}", gl_string(VERSION));
    log::debug!(
        "GL_SHADING_LANGUAGE_VERSION = {}",
        gl_string(SHADING_LANGUAGE_VERSION)
    );
}

/// Fills the bound framebuffer with an opaque color and resets depth.
pub fn clear_color_depth(r: f32, g: f32, b: f32) {
    unsafe {
        gl::ClearColor(r, g, b, 1.0);
        gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }
}
