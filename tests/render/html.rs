use super::helpers::{depth, flavor, html, html_with, simple};
use sprig::Flavor;

#[test]
fn whole_document() {
    let output = html("# Title\n\nA *b* **c**.\n\n> quote\n\n- one\n- two\n\n---\n");
    similar_asserts::assert_eq!(
        output,
        "<h1>Title</h1>\n\
         <p>A <em>b</em> <strong>c</strong>.</p>\n\
         <blockquote>\n<p>quote</p>\n</blockquote>\n\
         <ul>\n<li>one</li>\n<li>two</li>\n</ul>\n\
         <hr />\n"
    );
}

#[test]
fn loose_item_wraps_paragraphs() {
    similar_asserts::assert_eq!(
        html("- a\n\n    b\n"),
        "<ul>\n<li>\n<p>a</p>\n<p>b</p>\n</li>\n</ul>\n"
    );
}

#[test]
fn simple_mode_ignores_flanking() {
    similar_asserts::assert_eq!(
        html_with("a * b * c", &simple()),
        "<p>a <em> b </em> c</p>\n"
    );
    similar_asserts::assert_eq!(html("a * b * c"), "<p>a * b * c</p>\n");
}

#[test]
fn quote_depth_is_capped() {
    similar_asserts::assert_eq!(
        html_with(">>> deep", &depth(2)),
        "<blockquote>\n<blockquote>\n<p>&gt; deep</p>\n</blockquote>\n</blockquote>\n"
    );
}

#[test]
fn commonmark_flavor_has_no_strikethrough() {
    let config = flavor(Flavor::CommonMark);
    similar_asserts::assert_eq!(html_with("~~x~~", &config), "<p>~~x~~</p>\n");
    similar_asserts::assert_eq!(html("~~x~~"), "<p><del>x</del></p>\n");
}

#[test]
fn undefined_reference_is_plain_text() {
    similar_asserts::assert_eq!(html("[a][nowhere]"), "<p>[a][nowhere]</p>\n");
}

#[test]
fn emphasis_inside_link_text() {
    similar_asserts::assert_eq!(
        html("[*a* b](/x)"),
        "<p><a href=\"/x\"><em>a</em> b</a></p>\n"
    );
}
