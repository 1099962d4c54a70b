use addquickly_core::{parse_entries, ParseResult, Tag};

fn tag(name: &str) -> Tag {
    Tag {
        name: name.to_string(),
    }
}

fn draft_names(result: &ParseResult) -> Vec<&str> {
    result
        .drafts
        .iter()
        .map(|draft| draft.name.as_str())
        .collect()
}

fn tag_names(result: &ParseResult) -> Vec<&str> {
    result.tags.iter().map(|tag| tag.name.as_str()).collect()
}

#[test]
fn empty_input_yields_empty_result() {
    let result = parse_entries("");
    assert!(result.tags.is_empty());
    assert!(result.drafts.is_empty());
}

#[test]
fn whitespace_only_input_yields_empty_result() {
    let result = parse_entries("   ");
    assert!(result.tags.is_empty());
    assert!(result.drafts.is_empty());
}

#[test]
fn comma_free_input_is_a_single_entry() {
    let result = parse_entries("Alice Smith");
    assert_eq!(draft_names(&result), vec!["Alice Smith"]);
    assert!(result.tags.is_empty());
}

#[test]
fn entries_split_on_commas_and_trim_whitespace() {
    let result = parse_entries("Alice,  Bob ");
    assert_eq!(draft_names(&result), vec!["Alice", "Bob"]);
}

#[test]
fn every_draft_carries_the_full_shared_tag_set() {
    let result = parse_entries("Alice #friend, Bob #friend #work");
    assert_eq!(result.tags, vec![tag("friend"), tag("work")]);
    assert_eq!(result.drafts.len(), 2);
    for draft in &result.drafts {
        assert_eq!(draft.tags, result.tags);
    }
    assert_eq!(draft_names(&result), vec!["Alice", "Bob"]);
}

#[test]
fn hashtag_only_input_yields_tags_but_no_draft() {
    let result = parse_entries("#onlytag");
    assert_eq!(result.tags, vec![tag("onlytag")]);
    assert!(result.drafts.is_empty());
}

#[test]
fn empty_segments_produce_no_placeholder_drafts() {
    let result = parse_entries("Alice,, Bob");
    assert_eq!(draft_names(&result), vec!["Alice", "Bob"]);
}

#[test]
fn hashtag_only_segment_produces_no_draft() {
    let result = parse_entries("Alice, #work, Bob");
    assert_eq!(draft_names(&result), vec!["Alice", "Bob"]);
    assert_eq!(result.tags, vec![tag("work")]);
}

#[test]
fn tag_order_is_first_occurrence_across_segments() {
    let result = parse_entries("Bob #zeta #alpha, Carol #zeta");
    assert_eq!(tag_names(&result), vec!["zeta", "alpha"]);
}

#[test]
fn duplicate_tags_are_deduplicated_case_sensitively() {
    let result = parse_entries("#Work Alice #work, Bob #Work");
    assert_eq!(tag_names(&result), vec!["Work", "work"]);
}

#[test]
fn no_two_tags_ever_share_a_name() {
    let result = parse_entries("#a #b #a, #c #b #a, x #c");
    let names = tag_names(&result);
    let unique: std::collections::HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn edge_punctuation_is_stripped_from_tag_names() {
    let result = parse_entries("#tag! Alice, #\u{2026}quoted\u{2026} Bob");
    assert_eq!(tag_names(&result), vec!["tag", "quoted"]);
}

#[test]
fn interior_punctuation_in_tags_is_preserved() {
    let result = parse_entries("#ta#g Alice");
    assert_eq!(tag_names(&result), vec!["ta#g"]);
}

#[test]
fn punctuation_only_hashtags_are_skipped() {
    let result = parse_entries("# Alice, #... Bob");
    assert!(result.tags.is_empty());
    assert_eq!(draft_names(&result), vec!["Alice", "Bob"]);
}

#[test]
fn mid_word_hash_is_not_a_tag() {
    let result = parse_entries("mail#work Alice");
    assert!(result.tags.is_empty());
    assert_eq!(draft_names(&result), vec!["mail#work Alice"]);
}

#[test]
fn multiple_spaces_collapse_to_single_separators_in_names() {
    let result = parse_entries("Alice   van   Dyke");
    assert_eq!(draft_names(&result), vec!["Alice van Dyke"]);
}

#[test]
fn hashtags_never_contribute_to_names() {
    let result = parse_entries("#met Alice Smith #conference");
    assert_eq!(draft_names(&result), vec!["Alice Smith"]);
    assert_eq!(tag_names(&result), vec!["met", "conference"]);
}

#[test]
fn parsing_is_referentially_transparent() {
    let input = "Alice #friend, Bob #friend #work, , #stray!";
    assert_eq!(parse_entries(input), parse_entries(input));
}

#[test]
fn draft_order_matches_segment_order() {
    let result = parse_entries("Carol, Alice, Bob");
    assert_eq!(draft_names(&result), vec!["Carol", "Alice", "Bob"]);
}
