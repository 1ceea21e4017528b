use lazy_static::lazy_static;
use regex::Regex;

/// Input limit of the speech endpoint, in characters.
pub const MAX_SPEECH_CHARS: usize = 4096;

lazy_static! {
    static ref RULE_REGEX: Regex = Regex::new(r"^\s*(?:-{3,}|\*{3,}|_{3,})\s*$").unwrap();
    static ref MARKER_REGEX: Regex = Regex::new(
        r"(?x)
        ^\s*\#{1,6}\s+|          # Heading  ### Title
        ^\s*>\s*|                # Quote    > text
        ^\s*[-*+]\s+             # Bullet   - item
        "
    )
    .unwrap();
    // Paired markers only, opening at a word start
    static ref STAR_EMPHASIS_REGEX: Regex =
        Regex::new(r"(^|[^\w*])\*{1,3}([^*\s](?:[^*]*?[^*\s])?)\*{1,3}").unwrap();
    static ref UNDERSCORE_EMPHASIS_REGEX: Regex =
        Regex::new(r"(^|[^\w])_{2,3}([^_\s](?:[^_]*?[^_\s])?)_{2,3}").unwrap();
    static ref CODE_REGEX: Regex = Regex::new(r"`+").unwrap();
    static ref SPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Turn model markdown into a plain script suitable for speech synthesis.
pub fn prepare(input: &str) -> String {
    let sentences: Vec<String> = input
        .lines()
        .filter(|line| !RULE_REGEX.is_match(line))
        .map(speakable_line)
        .filter(|line| !line.is_empty())
        .collect();

    truncate(&sentences.join(" "), MAX_SPEECH_CHARS)
}

fn speakable_line(line: &str) -> String {
    let line = MARKER_REGEX.replace(line, "");
    let line = STAR_EMPHASIS_REGEX.replace_all(&line, "${1}${2}");
    let line = UNDERSCORE_EMPHASIS_REGEX.replace_all(&line, "${1}${2}");
    let line = CODE_REGEX.replace_all(&line, "");
    let mut line = SPACE_REGEX.replace_all(line.trim(), " ").into_owned();

    // Line breaks become sentence breaks so the voice pauses between them
    if let Some(last) = line.chars().last() {
        if last.is_alphanumeric() || last == ')' || last == '"' {
            line.push('.');
        }
    }

    line
}

/// Cut `text` to at most `max_chars` characters, preferring a word boundary.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let head = &text[..cut];

    let trimmed = match head.rfind(char::is_whitespace) {
        Some(space) if space > 0 => &head[..space],
        _ => head,
    };

    tracing::warn!(
        original = text.chars().count(),
        kept = trimmed.chars().count(),
        "Speech script truncated"
    );

    trimmed.trim_end().to_string()
}
