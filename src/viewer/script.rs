//! Scripted viewer sessions.
//!
//! A script drives the headless viewer one step per line:
//!
//! ```text
//! # open the third image and look around
//! click thumb 2
//! key ArrowRight
//! touch 200 120      # swipe left by 80px
//! click backdrop
//! wait 160
//! ```
//!
//! | Step | Effect |
//! |------|--------|
//! | `click thumb <i>` | click thumbnail `i` (0-based) |
//! | `click prev\|next\|close\|backdrop\|dialog` | click an overlay region |
//! | `key <Name>` | key press, named as in `KeyboardEvent.key` |
//! | `touch <from> <to>` | touch start at `from`, touch end at `to` |
//! | `frame` | run one rendering cycle |
//! | `wait <ms>` | advance the clock, firing due timers |
//! | `settle` | run everything still pending |

use super::event::{ClickTarget, Event, EventLoop, Key};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Input(Event),
    Swipe { from: f64, to: f64 },
    Frame,
    Wait(Duration),
    Settle,
}

/// A parsed step with the source text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub text: String,
    pub step: Step,
}

fn parse_number<T: std::str::FromStr>(word: Option<&str>, what: &str) -> Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {what}"))?;
    word.parse().map_err(|_| format!("invalid {what} {word:?}"))
}

fn parse_click(words: &[&str]) -> Result<ClickTarget, String> {
    Ok(match words {
        ["thumb", rest @ ..] => ClickTarget::Thumbnail(parse_number(rest.first().copied(), "index")?),
        ["prev"] => ClickTarget::Prev,
        ["next"] => ClickTarget::Next,
        ["close"] => ClickTarget::Close,
        ["backdrop"] => ClickTarget::Backdrop,
        ["dialog"] => ClickTarget::Dialog,
        [] => return Err("missing click target".to_string()),
        other => return Err(format!("unknown click target {:?}", other.join(" "))),
    })
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_step(text: &str) -> Result<Option<Step>, String> {
    let code = text.split('#').next().unwrap_or_default();
    let words: Vec<&str> = code.split_whitespace().collect();

    let step = match words.as_slice() {
        [] => return Ok(None),
        ["click", rest @ ..] => Step::Input(Event::Click(parse_click(rest)?)),
        ["key", name] => {
            let key = name.parse::<Key>().unwrap_or_else(|never| match never {});
            Step::Input(Event::KeyDown(key))
        }
        ["touch", from, to] => Step::Swipe {
            from: parse_number(Some(*from), "coordinate")?,
            to: parse_number(Some(*to), "coordinate")?,
        },
        ["frame"] => Step::Frame,
        ["wait", ms] => Step::Wait(Duration::from_millis(parse_number(Some(*ms), "delay")?)),
        ["settle"] => Step::Settle,
        [command, ..] => return Err(format!("unknown or malformed step {command:?}")),
    };
    Ok(Some(step))
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (i, text) in source.lines().enumerate() {
        let step = parse_step(text).map_err(|message| ScriptError::Syntax {
            line: i + 1,
            message,
        })?;
        if let Some(step) = step {
            lines.push(ScriptLine {
                line: i + 1,
                text: text.trim().to_string(),
                step,
            });
        }
    }
    Ok(lines)
}

/// Apply one step. Input steps are followed by a rendering cycle, the way a
/// browser paints after each task.
pub fn apply(event_loop: &mut EventLoop, step: &Step) {
    match step {
        Step::Input(event) => {
            event_loop.dispatch(event.clone());
            event_loop.run_frame();
        }
        Step::Swipe { from, to } => {
            event_loop.dispatch(Event::TouchStart { x: *from });
            event_loop.dispatch(Event::TouchEnd { x: *to });
            event_loop.run_frame();
        }
        Step::Frame => {
            event_loop.run_frame();
        }
        Step::Wait(by) => event_loop.advance(*by),
        Step::Settle => event_loop.settle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::viewer::Lightbox;

    #[test]
    fn parses_every_step_kind() {
        let script = parse_script(
            "click thumb 3\nclick prev\nclick next\nclick close\nclick backdrop\nclick dialog\n\
             key Escape\nkey ArrowLeft\ntouch 100 40.5\nframe\nwait 160\nsettle\n",
        )
        .unwrap();
        let steps: Vec<Step> = script.into_iter().map(|l| l.step).collect();
        assert_eq!(
            steps,
            vec![
                Step::Input(Event::Click(ClickTarget::Thumbnail(3))),
                Step::Input(Event::Click(ClickTarget::Prev)),
                Step::Input(Event::Click(ClickTarget::Next)),
                Step::Input(Event::Click(ClickTarget::Close)),
                Step::Input(Event::Click(ClickTarget::Backdrop)),
                Step::Input(Event::Click(ClickTarget::Dialog)),
                Step::Input(Event::KeyDown(Key::Escape)),
                Step::Input(Event::KeyDown(Key::ArrowLeft)),
                Step::Swipe {
                    from: 100.0,
                    to: 40.5
                },
                Step::Frame,
                Step::Wait(Duration::from_millis(160)),
                Step::Settle,
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let script = parse_script("# heading\n\n  click next  # trailing\n").unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].line, 3);
        assert_eq!(script[0].text, "click next  # trailing");
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse_script("click next\njump 3\n").unwrap_err();
        assert!(matches!(err, ScriptError::Syntax { line: 2, .. }));

        let err = parse_script("click thumb x").unwrap_err();
        assert_eq!(
            err,
            ScriptError::Syntax {
                line: 1,
                message: "invalid index \"x\"".to_string()
            }
        );

        assert!(parse_script("click").is_err());
        assert!(parse_script("wait -5").is_err());
        assert!(parse_script("touch 10").is_err());
    }

    #[test]
    fn applied_script_drives_the_viewer() {
        let mut el = loaded_loop(&["a.jpg", "b.jpg", "c.jpg"]);
        let script = parse_script("click thumb 0\ntouch 200 100\nkey Escape\nwait 160\n").unwrap();

        apply(&mut el, &script[0].step);
        assert_eq!(el.viewer().state().lightbox(), Lightbox::Open);

        apply(&mut el, &script[1].step);
        assert_eq!(el.viewer().current_index(), Some(1));

        apply(&mut el, &script[2].step);
        assert_eq!(el.viewer().state().lightbox(), Lightbox::Closing);

        apply(&mut el, &script[3].step);
        assert_eq!(el.viewer().state().lightbox(), Lightbox::Closed);
    }
}
