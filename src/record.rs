//! Record types produced by extraction.
//!
//! One record is built per activity fragment and never mutated afterwards.
//! Field names (and their order) are the column headers of the exported sheet.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Serialize, Serializer};

use crate::error::Error;

/// Which kind of activity page was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The "Posts" tab of the activity page.
    Posts,
    /// The "Comments" tab of the activity page.
    Comments,
}

impl Mode {
    /// Lowercase name used in filenames and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Comments => "comments",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posts" | "post" => Ok(Self::Posts),
            "comments" | "comment" => Ok(Self::Comments),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// Date, time and weekday derived together from a single source.
///
/// The three fields are either all taken from one timestamp, all defaulted to
/// "today" (with an empty time), or all empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DateParts {
    /// `YYYY-MM-DD`, or empty.
    pub date: String,
    /// `HH:MM:SS`, or empty.
    pub time: String,
    /// English weekday name, or empty.
    pub day: String,
}

impl DateParts {
    /// All three parts from one UTC timestamp.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            date: dt.format("%Y-%m-%d").to_string(),
            time: dt.format("%H:%M:%S").to_string(),
            day: dt.format("%A").to_string(),
        }
    }

    /// Today's date and weekday from the wall clock, with no time.
    #[must_use]
    pub fn today() -> Self {
        let now = Local::now();
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            time: String::new(),
            day: now.format("%A").to_string(),
        }
    }

    /// No date information at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no part is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.time.is_empty() && self.day.is_empty()
    }
}

/// Content format of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PostFormat {
    /// A poll.
    #[serde(rename = "Poll")]
    Poll,
    /// A plain repost of someone else's post.
    #[serde(rename = "Repost")]
    Repost,
    /// A repost with added commentary.
    #[serde(rename = "Repost with copy")]
    RepostWithCopy,
    /// A LinkedIn article.
    #[serde(rename = "LinkedIn Article")]
    LinkedInArticle,
    /// A document carousel.
    #[serde(rename = "Carousel")]
    Carousel,
    /// A post sharing an external link.
    #[serde(rename = "Link")]
    Link,
    /// A video post.
    #[serde(rename = "Video")]
    Video,
    /// A single content image.
    #[serde(rename = "Image")]
    Image,
    /// Several content images.
    #[serde(rename = "Image(s)")]
    Images,
    /// Text only.
    #[serde(rename = "Text")]
    Text,
}

impl PostFormat {
    /// Every format, in classifier precedence order.
    pub const ALL: [Self; 10] = [
        Self::Poll,
        Self::Repost,
        Self::RepostWithCopy,
        Self::LinkedInArticle,
        Self::Carousel,
        Self::Link,
        Self::Video,
        Self::Image,
        Self::Images,
        Self::Text,
    ];

    /// Label written to the sheet.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poll => "Poll",
            Self::Repost => "Repost",
            Self::RepostWithCopy => "Repost with copy",
            Self::LinkedInArticle => "LinkedIn Article",
            Self::Carousel => "Carousel",
            Self::Link => "Link",
            Self::Video => "Video",
            Self::Image => "Image",
            Self::Images => "Image(s)",
            Self::Text => "Text",
        }
    }
}

impl fmt::Display for PostFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a comment responds to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// The commenter commented on a post they wrote.
    OwnPost,
    /// The commenter commented on someone else's post.
    AuthorPost(String),
    /// The post author could not be determined.
    Post,
    /// The commenter replied to another comment.
    Reply(String),
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnPost => f.write_str("Direct comment on their own post"),
            Self::AuthorPost(author) => write!(f, "Direct comment on {author}'s post"),
            Self::Post => f.write_str("Direct comment on post"),
            Self::Reply(person) => write!(f, "Reply to {person}"),
        }
    }
}

impl Serialize for CommentKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of a posts export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    /// Post text, whitespace-normalized.
    pub caption: String,
    /// Posting date, time and weekday.
    #[serde(flatten)]
    pub when: DateParts,
    /// Reaction count.
    pub likes: u64,
    /// Comment count.
    pub comments: u64,
    /// Repost/share count.
    pub shares: u64,
    /// Content format.
    pub format: PostFormat,
    /// Canonical post URL, or empty when no id was found.
    pub url: String,
}

/// One row of a comments export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    /// The commenter's own comment text.
    pub comment: String,
    /// Date parts of the commented post.
    #[serde(flatten)]
    pub when: DateParts,
    /// Reactions on the comment itself.
    pub likes: u64,
    /// What the comment responds to.
    #[serde(rename = "type")]
    pub kind: CommentKind,
    /// Text of the post or parent comment being answered.
    pub in_response_to: String,
    /// Canonical URL of the commented post.
    pub url: String,
}

/// The records of one page, tagged by mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Records {
    /// Rows from the posts tab.
    Posts(Vec<PostRecord>),
    /// Rows from the comments tab.
    Comments(Vec<CommentRecord>),
}

impl Records {
    /// Mode these records were collected in.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Posts(_) => Mode::Posts,
            Self::Comments(_) => Mode::Comments,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Posts(rows) => rows.len(),
            Self::Comments(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
