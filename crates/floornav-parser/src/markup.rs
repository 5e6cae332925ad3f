//! Line scanner for floor-plan markup.
//!
//! Documents are processed one line at a time: every element of interest
//! must start on its own line and carry all of its attributes there. The
//! scanner reads the element head (`<tag attr="value" ...`) at the start of
//! a line and ignores whatever follows it, such as text content or a
//! closing tag.

use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, delimited, opt, preceded, repeat, separated_pair},
    error::ModalResult,
    token::{take_till, take_while},
};

type Input<'a> = &'a str;

/// Element tags that take part in graph building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `<g ...>`
    Group,
    /// `</g>`
    GroupClose,
    /// `<path ...>`
    Path,
    /// `<text ...>`
    Text,
    /// `<rect ...>`, accepted but not otherwise used.
    Rect,
}

impl Tag {
    fn classify(name: &str, closing: bool) -> Option<Self> {
        match (name, closing) {
            ("g", false) => Some(Self::Group),
            ("g", true) => Some(Self::GroupClose),
            ("path", false) => Some(Self::Path),
            ("text", false) => Some(Self::Text),
            ("rect", false) => Some(Self::Rect),
            _ => None,
        }
    }
}

/// The head of a recognised element on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    tag: Tag,
    attributes: Vec<(&'a str, &'a str)>,
    self_closing: bool,
}

impl<'a> Element<'a> {
    /// The element tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&'a str> {
        self.attribute("id")
    }

    /// Whether the head ends with `/>`.
    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }
}

/// Scans the element head at the start of `line`.
///
/// Returns `None` for lines that do not start with an element head or whose
/// tag is not one of [`Tag`].
pub fn scan_line(line: &str) -> Option<Element<'_>> {
    let mut input = line;
    let (closing, name, attributes, self_closing) = element_head(&mut input).ok()?;
    let tag = Tag::classify(name, closing)?;

    Some(Element {
        tag,
        attributes,
        self_closing,
    })
}

type Head<'a> = (bool, &'a str, Vec<(&'a str, &'a str)>, bool);

fn element_head<'a>(input: &mut Input<'a>) -> ModalResult<Head<'a>> {
    (
        preceded((multispace0, '<'), opt('/')),
        name,
        repeat(0.., attribute),
        preceded(multispace0, opt('/')),
    )
        .map(
            |(closing, name, attributes, self_closing): (
                Option<char>,
                &'a str,
                Vec<(&'a str, &'a str)>,
                Option<char>,
            )| { (closing.is_some(), name, attributes, self_closing.is_some()) },
        )
        .parse_next(input)
}

fn name<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
    })
    .parse_next(input)
}

fn attribute<'a>(input: &mut Input<'a>) -> ModalResult<(&'a str, &'a str)> {
    preceded(
        multispace1,
        separated_pair(name, (multispace0, '=', multispace0), quoted),
    )
    .parse_next(input)
}

fn quoted<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
    ))
    .parse_next(input)
}
