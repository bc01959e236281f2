//! Parser for recitation study material.
//!
//! # Format
//! ```text
//! 古诗：
//! 《静夜思》
//! 唐·李白
//! 床前明月光，疑是地上霜。
//! 注释
//! 床：井上的围栏。
//! 译文
//! 明亮的月光洒在井栏上，
//! 好像地上泛起了一层白霜。
//!
//! 课文段落：
//! 《燕子》（1-3自然段）
//! 一身乌黑的羽毛，一对俊俏轻快的翅膀，
//!
//! 日积月累：
//! 语文园地一：《忆江南》（唐·白居易）
//! 江南好，风景旧曾谙。
//! 语文园地二：文房四宝：笔墨纸砚
//! ```
//!
//! Each line is classified by the first matching rule in `RULES`. Lines that
//! fit no item are dropped; parsing never fails.

use tracing::{debug, trace, warn};

use crate::normalize::is_punctuation;
use crate::types::{Category, ContentItem};

const TITLE_OPEN: char = '《';
const TITLE_CLOSE: char = '》';
const QUALIFIER_OPEN: char = '（';
const QUALIFIER_CLOSE: char = '）';
const HEADING_SEPARATOR: char = '：';
const STUDY_FIELD_MARKER: &str = "语文园地";
const NOTES_KEYWORD: &str = "注释";
const TRANSLATION_KEYWORD: &str = "译文";
const AUTHOR_SEPARATOR: char = '·';
const DYNASTIES: &[char] = &['唐', '宋', '元', '明', '清'];
/// Marks after which a content line is split into separate lines.
const CLAUSE_ENDINGS: &[char] = &['。', '！', '？', '，', '、', '；'];

/// Parse study material into content items, in source order.
pub fn parse(content: &str) -> Vec<ContentItem> {
    let mut parser = Parser::new();

    for raw in content.lines() {
        let line = strip_line_number(raw.trim());
        if line.is_empty() {
            continue;
        }
        parser.process_line(line);
    }

    let items = parser.finish();
    for (idx, item) in items.iter().enumerate() {
        debug!(
            index = idx + 1,
            category = item.category.label(),
            title = %item.title,
            lines = item.lines.len(),
            "parsed item"
        );
    }
    debug!(count = items.len(), "parsed study material");
    items
}

/// Strip a leading line-number token such as `L12:` or `12:`.
fn strip_line_number(line: &str) -> &str {
    let rest = line.strip_prefix('L').unwrap_or(line);
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    match rest[digits..].strip_prefix(':') {
        Some(body) => body.trim(),
        None => line,
    }
}

/// Where plain content lines of the open item go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before any section header: the recitable text.
    Body,
    Notes,
    Translation,
}

struct ItemBuilder {
    category: Category,
    title: String,
    author: String,
    lines: Vec<String>,
    notes: Vec<String>,
    translation: String,
}

impl ItemBuilder {
    fn new(category: Category, title: String) -> Self {
        Self {
            category,
            title,
            author: String::new(),
            lines: Vec::new(),
            notes: Vec::new(),
            translation: String::new(),
        }
    }

    /// Set the author unless one is already known.
    fn set_author(&mut self, author: &str) {
        if self.author.is_empty() {
            self.author = author.to_string();
        }
    }

    fn push_content(&mut self, section: Section, line: &str) {
        match section {
            Section::Body => self
                .lines
                .extend(line.split_inclusive(CLAUSE_ENDINGS).map(str::to_string)),
            Section::Notes => self.notes.push(line.to_string()),
            Section::Translation => self.translation.push_str(line),
        }
    }

    fn build(self) -> ContentItem {
        ContentItem {
            category: self.category,
            title: self.title,
            author: self.author,
            lines: self.lines,
            notes: self.notes,
            translation: self.translation,
        }
    }
}

/// Title, author and first line taken from a daily accumulation header.
#[derive(Debug, PartialEq, Eq)]
struct Heading {
    title: String,
    author: String,
    first_line: Option<String>,
}

impl Heading {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            author: String::new(),
            first_line: None,
        }
    }

    /// Split `语文园地一：《忆江南》（唐·白居易）` style headers.
    ///
    /// Returns `None` when nothing is left to use as a title.
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim_start_matches(|c: char| c == HEADING_SEPARATOR || c.is_whitespace());
        if line.is_empty() {
            return None;
        }
        let Some((left, right)) = line.split_once(HEADING_SEPARATOR) else {
            return Some(Self::titled(line));
        };

        let heading = if right.is_empty() {
            Self::titled(left)
        } else if let Some((name, qualifier)) = find_qualified_title(right) {
            Self {
                title: format!("{left}{HEADING_SEPARATOR}{name}"),
                author: qualifier.to_string(),
                first_line: None,
            }
        } else if right.contains(HEADING_SEPARATOR) {
            Self {
                title: left.to_string(),
                author: String::new(),
                first_line: Some(right.to_string()),
            }
        } else {
            Self::titled(&format!("{left}{HEADING_SEPARATOR}{right}"))
        };
        Some(heading)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    CategoryHeader(Category),
    PoemTitle(&'a str),
    PassageTitle(String),
    AccumulationHeader { heading: Heading, fallback: bool },
    Stray,
    Author,
    Section(Section),
    Content,
}

/// A line classifier. Returns `None` when the rule does not apply.
type Rule = for<'a> fn(&Parser, &'a str) -> Option<LineKind<'a>>;

/// Classification rules in priority order; the first match wins.
const RULES: [Rule; 8] = [
    category_header,
    poem_title,
    passage_title,
    accumulation_header,
    stray_line,
    author_line,
    section_switch,
    content_line,
];

fn category_header<'a>(_parser: &Parser, line: &'a str) -> Option<LineKind<'a>> {
    Category::from_header(line).map(LineKind::CategoryHeader)
}

fn poem_title<'a>(_parser: &Parser, line: &'a str) -> Option<LineKind<'a>> {
    if line.contains(QUALIFIER_OPEN) || line.contains(QUALIFIER_CLOSE) {
        return None;
    }
    let rest = line.strip_prefix(TITLE_OPEN)?;
    let (name, _) = rest.split_once(TITLE_CLOSE)?;
    if name.is_empty() {
        return None;
    }
    Some(LineKind::PoemTitle(name))
}

fn passage_title<'a>(_parser: &Parser, line: &'a str) -> Option<LineKind<'a>> {
    if !line.starts_with(TITLE_OPEN)
        || !line.contains(QUALIFIER_OPEN)
        || !line.contains(QUALIFIER_CLOSE)
    {
        return None;
    }
    let title = match find_qualified_title(line) {
        Some((name, qualifier)) => {
            format!("{name}{QUALIFIER_OPEN}{qualifier}{QUALIFIER_CLOSE}")
        }
        None => line.to_string(),
    };
    Some(LineKind::PassageTitle(title))
}

fn accumulation_header<'a>(parser: &Parser, line: &'a str) -> Option<LineKind<'a>> {
    let keyword = line.contains(STUDY_FIELD_MARKER);
    let fallback = parser.category == Some(Category::DailyAccumulation) && parser.current.is_none();
    if !keyword && !fallback {
        return None;
    }
    Some(LineKind::AccumulationHeader {
        heading: Heading::parse(line)?,
        fallback: !keyword,
    })
}

fn stray_line<'a>(parser: &Parser, _line: &'a str) -> Option<LineKind<'a>> {
    parser.current.is_none().then_some(LineKind::Stray)
}

fn author_line<'a>(parser: &Parser, line: &'a str) -> Option<LineKind<'a>> {
    let item = parser.current.as_ref()?;
    if !item.author.is_empty() {
        return None;
    }
    let bare_name = item.category == Category::Poem
        && parser.section == Section::Body
        && !item.lines.is_empty()
        && !is_section_keyword(line)
        && is_bare_name(line);
    (is_attribution(line) || bare_name).then_some(LineKind::Author)
}

fn is_section_keyword(line: &str) -> bool {
    line.starts_with(NOTES_KEYWORD) || line.starts_with(TRANSLATION_KEYWORD)
}

fn section_switch<'a>(_parser: &Parser, line: &'a str) -> Option<LineKind<'a>> {
    if line.starts_with(NOTES_KEYWORD) {
        Some(LineKind::Section(Section::Notes))
    } else if line.starts_with(TRANSLATION_KEYWORD) {
        Some(LineKind::Section(Section::Translation))
    } else {
        None
    }
}

fn content_line<'a>(_parser: &Parser, _line: &'a str) -> Option<LineKind<'a>> {
    Some(LineKind::Content)
}

/// Find `《name》（qualifier）` in `text`.
fn find_qualified_title(text: &str) -> Option<(&str, &str)> {
    let (_, rest) = text.split_once(TITLE_OPEN)?;
    let (name, rest) = rest.split_once(TITLE_CLOSE)?;
    let rest = rest.strip_prefix(QUALIFIER_OPEN)?;
    let qualifier = &rest[..rest.rfind(QUALIFIER_CLOSE)?];
    if name.is_empty() || qualifier.is_empty() {
        return None;
    }
    Some((name, qualifier))
}

/// `唐·李白`, `宋代 苏轼`, or anything with a middle dot.
fn is_attribution(line: &str) -> bool {
    if line.contains(AUTHOR_SEPARATOR) {
        return true;
    }
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(dynasty), Some(sep)) => {
            DYNASTIES.contains(&dynasty) && (sep == '代' || sep == AUTHOR_SEPARATOR)
        }
        _ => false,
    }
}

/// A short line with no punctuation, such as `李白`. `鹅鹅鹅` is verse.
fn is_bare_name(line: &str) -> bool {
    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let len = line.chars().count();
    (2..=4).contains(&len)
        && !chars.all(|c| c == first)
        && !line
            .chars()
            .any(|c| is_punctuation(c) || c.is_whitespace() || c.is_ascii_alphanumeric())
}

struct Parser {
    category: Option<Category>,
    current: Option<ItemBuilder>,
    section: Section,
    items: Vec<ContentItem>,
}

impl Parser {
    fn new() -> Self {
        Self {
            category: None,
            current: None,
            section: Section::Body,
            items: Vec::new(),
        }
    }

    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        RULES
            .iter()
            .find_map(|rule| rule(self, line))
            .unwrap_or(LineKind::Content)
    }

    fn process_line(&mut self, line: &str) {
        match self.classify(line) {
            LineKind::CategoryHeader(category) => {
                self.finalize_current();
                self.category = Some(category);
            }
            LineKind::PoemTitle(title) => {
                let category = self.category.unwrap_or_default();
                self.start_item(ItemBuilder::new(category, title.to_string()));
            }
            LineKind::PassageTitle(title) => {
                self.start_item(ItemBuilder::new(Category::TextPassage, title));
            }
            LineKind::AccumulationHeader { heading, fallback } => {
                if fallback {
                    warn!(line, "daily accumulation item opened without a study-field marker");
                }
                let mut item = ItemBuilder::new(Category::DailyAccumulation, heading.title);
                item.author = heading.author;
                item.lines.extend(heading.first_line);
                self.start_item(item);
            }
            LineKind::Stray => trace!(line, "discarding line outside any item"),
            LineKind::Author => {
                if let Some(item) = self.current.as_mut() {
                    item.set_author(line);
                }
            }
            LineKind::Section(section) => self.section = section,
            LineKind::Content => {
                let section = self.section;
                if let Some(item) = self.current.as_mut() {
                    item.push_content(section, line);
                }
            }
        }
    }

    fn start_item(&mut self, item: ItemBuilder) {
        self.finalize_current();
        self.current = Some(item);
        self.section = Section::Body;
    }

    fn finalize_current(&mut self) {
        if let Some(item) = self.current.take() {
            self.items.push(item.build());
        }
    }

    fn finish(mut self) -> Vec<ContentItem> {
        self.finalize_current();
        self.items
    }
}
