use super::*;
use crate::text::measure::MonospaceMeasure;

fn mono() -> MonospaceMeasure {
    MonospaceMeasure {
        advance: 10.0,
        line_height: 20.0,
    }
}

fn words(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|l| l.split(' ').map(str::to_string))
        .collect()
}

#[test]
fn short_text_stays_on_one_line() {
    let lines = wrap_words("The obstacle is the way.", &mut mono(), 880.0);
    assert_eq!(lines, vec!["The obstacle is the way.".to_string()]);
}

#[test]
fn greedy_breaks_before_the_word_that_overflows() {
    // "aaa bbb" is 70px wide, "aaa bbb ccc" is 110px.
    let lines = wrap_words("aaa bbb ccc ddd", &mut mono(), 70.0);
    assert_eq!(lines, vec!["aaa bbb".to_string(), "ccc ddd".to_string()]);
}

#[test]
fn exact_fit_is_accepted() {
    let lines = wrap_words("abcde fghij", &mut mono(), 110.0);
    assert_eq!(lines, vec!["abcde fghij".to_string()]);
}

#[test]
fn oversized_word_sits_alone_unbroken() {
    let lines = wrap_words("a supercalifragilistic b", &mut mono(), 50.0);
    assert_eq!(
        lines,
        vec![
            "a".to_string(),
            "supercalifragilistic".to_string(),
            "b".to_string()
        ]
    );
}

#[test]
fn oversized_first_word_does_not_emit_empty_line() {
    let lines = wrap_words("enormousword x", &mut mono(), 30.0);
    assert_eq!(lines, vec!["enormousword".to_string(), "x".to_string()]);
}

#[test]
fn empty_and_blank_input_produce_no_lines() {
    assert!(wrap_words("", &mut mono(), 100.0).is_empty());
    assert!(wrap_words(" \t\n ", &mut mono(), 100.0).is_empty());
}

#[test]
fn whitespace_runs_collapse_to_single_spaces() {
    let lines = wrap_words("  keep\tgoing \n forward  ", &mut mono(), 1000.0);
    assert_eq!(lines, vec!["keep going forward".to_string()]);
}

#[test]
fn lines_fit_and_words_are_preserved() {
    let text = "It does not matter how slowly you go as long as you do not stop \
                and pneumonoultramicroscopicsilicovolcanoconiosis is long";
    for max in [40.0, 90.0, 150.0, 333.0, 880.0] {
        let mut m = mono();
        let lines = wrap_words(text, &mut m, max);

        let original: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        assert_eq!(words(&lines), original, "max {max}");

        for line in &lines {
            let w = m.width(line);
            let single_word = !line.contains(' ');
            assert!(w <= max || single_word, "{line:?} is {w}px > {max}");
        }
    }
}

#[test]
fn long_text_wraps_to_multiple_lines() {
    let text = "word ".repeat(60);
    let lines = wrap_words(&text, &mut mono(), 880.0);
    assert!(lines.len() >= 2);
}
