//! Font fixtures shared by unit tests.

use crate::font::{FontHandle, FontLibrary};

/// Pixel size used by most tests.
pub(crate) const SIZE: f32 = 48.0;

/// Vazirmatn variable: one `wght` axis, 100–900, default 400.
pub(crate) fn variable_font(library: &mut FontLibrary) -> FontHandle {
    FontHandle::from_bytes(library, font_test_data::VAZIRMATN_VAR.to_vec(), SIZE)
        .expect("test variable font must load")
}

/// Amstelvar subset mapping `A`: `wght` 100–400–900 and `wdth` 75–100–125.
pub(crate) fn weight_width_font(library: &mut FontLibrary) -> FontHandle {
    FontHandle::from_bytes(library, font_test_data::AMSTELVAR_AVAR2_A.to_vec(), SIZE)
        .expect("test weight/width font must load")
}

/// A static TrueType font without `fvar`.
pub(crate) fn static_font(library: &mut FontLibrary) -> FontHandle {
    FontHandle::from_bytes(library, font_test_data::SIMPLE_GLYF.to_vec(), SIZE)
        .expect("test static font must load")
}
