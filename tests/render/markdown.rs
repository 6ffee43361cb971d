use super::helpers::markdown;

#[test]
fn canonical_form_of_mixed_document() {
    let input = "Title\n=====\n\n    code\n\n* a\n* b\n\n> quote\n";
    similar_asserts::assert_eq!(
        markdown(input),
        "# Title\n\n```\ncode\n```\n\n- a\n- b\n\n> quote\n"
    );
}

#[test]
fn canonical_form_is_stable() {
    let inputs = [
        "# Title\n\n- a\n- b\n\n```\ncode\n```\n\n> quote\n",
        "| a | b |\n|:-:|--:|\n| 1 | 22 |\n",
        "Some [link][ref] and ![img](/i.png \"T\").\n\n[ref]: /r\n",
        "1. one\n2. two\n    - nested\n",
    ];
    for input in inputs {
        let once = markdown(input);
        let twice = markdown(&once);
        similar_asserts::assert_eq!(once, twice, "input:\n{}", input);
    }
}

#[test]
fn definitions_only_document() {
    similar_asserts::assert_eq!(markdown("[a]: /x\n"), "[a]: /x\n");
}

#[test]
fn empty_document() {
    similar_asserts::assert_eq!(markdown(""), "");
}
