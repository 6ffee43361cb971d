//! Rendering integration tests
//!
//! Whole documents go through `parse` and one of the bundled renderers. The
//! unit tests in `src/render` cover individual node kinds; these cover how
//! blocks and spans combine and how configuration changes the output.

mod render {
    pub(super) mod helpers;
    mod html;
    mod markdown;
}
