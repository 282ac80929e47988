#![no_main]

use grabbit_core::scope::Scope;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // Two scope attributes out of one input: everything before the first
    // ';' and everything after it.
    let (raw_a, raw_b) = match text.split_once(';') {
        Some(pair) => pair,
        None => (text, ""),
    };

    // parse must never panic.
    let a = Scope::parse(Some(raw_a));
    let b = Scope::parse(Some(raw_b));

    // Normalization is a fixpoint: re-parsing the display form must
    // reproduce the scope exactly.
    assert_eq!(
        Scope::parse(Some(&a.to_string())),
        a,
        "display form must re-parse to the same scope"
    );

    // from_tags over the split must agree with parse.
    assert_eq!(
        Scope::from_tags(raw_a.split(',')),
        a,
        "from_tags must normalize like parse"
    );

    // Tag sets come out sorted, deduplicated, trimmed, and non-empty.
    if let Scope::Tags(tags) = &a {
        for pair in tags.windows(2) {
            assert!(pair[0] < pair[1], "tags must be strictly sorted");
        }
        for tag in tags {
            assert!(!tag.is_empty(), "empty tag survived normalization");
            assert_eq!(tag, tag.trim(), "untrimmed tag survived normalization");
        }
    }

    // Matching is symmetric.
    assert_eq!(
        a.matches(&b),
        b.matches(&a),
        "matching must be symmetric"
    );

    // The empty set absorbs: it matches nothing, not even the wildcard.
    if a.matches_nothing() {
        assert!(!a.matches(&b), "empty set matched a scope");
        assert!(!a.matches(&Scope::Any), "empty set matched the wildcard");
    }

    // The wildcard matches every non-empty scope.
    if !a.matches_nothing() {
        assert!(Scope::Any.matches(&a), "wildcard refused a non-empty scope");
        assert!(a.matches(&a), "non-empty scope refused itself");
    }
});
