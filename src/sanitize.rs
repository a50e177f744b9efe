//! Model output cleanup
//!
//! Model answers arrive hard-wrapped, markdown-flavored and
//! occasionally oversized for a chat message field. The sanitizer
//! normalizes whitespace, unwraps markdown links and strips
//! formatting characters, then the crop enforces the display limit.

use regex::Regex;
use log::trace;

/// Sanitizer with pre-compiled patterns.
/// Cleanup steps run in a fixed order: link unwrapping must happen
/// before bracket stripping, whitespace collapsing before the trim.
pub struct AnswerSanitizer
{   hard_wrap: Regex
  , space_runs: Regex
  , newline_runs: Regex
  , markdown_link: Regex
  , stray_brackets: Regex
}

impl AnswerSanitizer
{   pub fn new() -> Self
    {   AnswerSanitizer
        {   // line break flanked by word characters in any script
            hard_wrap: Regex::new(
              r"([\p{L}\p{N}])\n([\p{L}\p{N}])"
            ).unwrap()
          , space_runs: Regex::new(r" {2,}").unwrap()
          , newline_runs: Regex::new(r"\n{3,}").unwrap()
          , markdown_link: Regex::new(
              r"\[([^\]]*)\]\((https?://[^)\s]+)\)"
            ).unwrap()
          , stray_brackets: Regex::new(r"[\[\]]").unwrap()
        }
    }

    /// Normalize a raw model answer
    pub fn clean(&self, raw: &str) -> String
    {   trace!("Sanitizing {} bytes of model output", raw.len());
        let text = self.hard_wrap
          .replace_all(raw, "$1 $2");
        let text = self.space_runs
          .replace_all(&text, " ");
        let text = self.newline_runs
          .replace_all(&text, "\n\n");
        // bare URL with a leading space so it never fuses with
        // the preceding word; the final trim covers the edges
        let text = self.markdown_link
          .replace_all(&text, " $2");
        let text = self.stray_brackets
          .replace_all(&text, "");
        let text = text.replace('`', "");
        text.trim().to_string()
    }

    /// Normalize and enforce the display limit, trimming any
    /// whitespace left dangling at the cut point
    pub fn clean_and_crop(
      &self
    , raw: &str
    , max_chars: usize
    ) -> String
    {   let cleaned = self.clean(raw);
        if cleaned.chars().count() <= max_chars
        {   return cleaned;
        }
        trace!(
          "Cropping answer to {} characters",
          max_chars
        );
        let cropped: String = cleaned
          .chars()
          .take(max_chars)
          .collect();
        cropped.trim_end().to_string()
    }
}

impl Default for AnswerSanitizer
{   fn default() -> Self
    {   AnswerSanitizer::new()
    }
}
