//! Create, list, update and delete courses.
//!
//! See <https://api.degreed.com/docs/#content-courses>.

use crate::config::Config;
use crate::jsonapi::{Attributes, Document, ResourceObject, ResourceType};
use crate::request::Request;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Response, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

const COURSES: ResourceType = ResourceType {
    type_name: "content/courses",
    collection: "content/courses",
    updatable: &[
        ("title", "title"),
        ("url", "url"),
        ("duration", "duration"),
        ("duration_type", "duration-type"),
        ("obsolete", "obsolete"),
        ("summary", "summary"),
    ],
};

/// A course as a typed single-resource document.
pub type CourseDocument = Document<ResourceObject<CourseAttributes>>;

/// A page of courses as a typed collection document.
pub type CourseListDocument = Document<Vec<ResourceObject<CourseAttributes>>>;

/// An integer parameter that may arrive as a number or as text.
///
/// Any primitive integer converts; values outside `i64` are rejected when the
/// course is created. Text is converted strictly: `"200"` becomes `200`, `"abc"` or `"2.5"` is
/// rejected with [`Error::InvalidInteger`] instead of being truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegerParam {
    /// Already an integer.
    Integer(i64),
    /// Text to be parsed.
    Text(String),
}

impl IntegerParam {
    /// Converts to an integer, naming `field` in the error.
    pub fn to_integer(&self, field: &'static str) -> Result<i64> {
        match self {
            IntegerParam::Integer(n) => Ok(*n),
            IntegerParam::Text(text) => text.trim().parse().map_err(|_| Error::InvalidInteger {
                field,
                value: text.clone(),
            }),
        }
    }
}

macro_rules! integer_param_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for IntegerParam {
                fn from(n: $ty) -> Self {
                    IntegerParam::Integer(n.into())
                }
            }
        )*
    };
}

integer_param_from!(i64, i32, i16, i8, u32, u16, u8);

// Values beyond i64 fall back to text so the strict conversion rejects them.
macro_rules! integer_param_from_wide {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for IntegerParam {
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => IntegerParam::Integer(n),
                        Err(_) => IntegerParam::Text(n.to_string()),
                    }
                }
            }
        )*
    };
}

integer_param_from_wide!(u64, usize, isize, i128, u128);

impl From<&str> for IntegerParam {
    fn from(text: &str) -> Self {
        IntegerParam::Text(text.to_string())
    }
}

impl From<String> for IntegerParam {
    fn from(text: String) -> Self {
        IntegerParam::Text(text)
    }
}

/// Parameters for [`Courses::create`].
///
/// `title`, `external_id`, `url`, `duration` and `duration_type` are
/// required; `summary` defaults to null. Completeness is checked when the
/// course is created, before anything is sent.
///
/// # Examples
///
/// ```
/// use degreed::NewCourse;
///
/// let course = NewCourse::new()
///     .title("New Course")
///     .external_id("arstaroisen")
///     .url("https://dev.lessonly.com")
///     .duration("200")
///     .duration_type("Seconds")
///     .summary("A Summary");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewCourse {
    title: Option<String>,
    external_id: Option<String>,
    url: Option<String>,
    duration: Option<IntegerParam>,
    duration_type: Option<String>,
    summary: Option<String>,
}

impl NewCourse {
    /// Starts an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// The course title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Your identifier for the course. Anything displayable is accepted.
    pub fn external_id(mut self, external_id: impl ToString) -> Self {
        self.external_id = Some(external_id.to_string());
        self
    }

    /// Where the course lives.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The course length, in units of `duration_type`.
    pub fn duration(mut self, duration: impl Into<IntegerParam>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// One of `Seconds`, `Minutes`, `Hours` or `Days`.
    pub fn duration_type(mut self, duration_type: impl Into<String>) -> Self {
        self.duration_type = Some(duration_type.into());
        self
    }

    /// Optional summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Validates the parameters and produces wire attributes.
    fn into_attributes(self) -> Result<Attributes> {
        let title = self.title.ok_or(Error::MissingParameter("title"))?;
        let external_id = self.external_id.ok_or(Error::MissingParameter("external_id"))?;
        let url = self.url.ok_or(Error::MissingParameter("url"))?;
        let duration = self
            .duration
            .ok_or(Error::MissingParameter("duration"))?
            .to_integer("duration")?;
        let duration_type = self
            .duration_type
            .ok_or(Error::MissingParameter("duration_type"))?;

        let mut attributes = Attributes::new();
        attributes.insert("title".into(), Value::String(title));
        attributes.insert("summary".into(), self.summary.map_or(Value::Null, Value::String));
        attributes.insert("external-id".into(), Value::String(external_id));
        attributes.insert("url".into(), Value::String(url));
        attributes.insert("duration".into(), Value::from(duration));
        attributes.insert("duration-type".into(), Value::String(duration_type));
        Ok(attributes)
    }
}

/// Wire attributes of a course as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CourseAttributes {
    /// Code of the content provider, if any.
    pub provider_code: Option<String>,
    /// Your identifier for the course.
    pub external_id: Option<String>,
    /// The course page on degreed.com.
    pub degreed_url: Option<String>,
    /// The course title.
    pub title: Option<String>,
    /// Short description.
    pub summary: Option<String>,
    /// Where the course lives.
    pub url: Option<String>,
    /// Whether the course is marked obsolete.
    pub obsolete: Option<bool>,
    /// Thumbnail image.
    pub image_url: Option<String>,
    /// Language of the course content.
    pub language: Option<String>,
    /// Length, in units of `duration_type`.
    pub duration: Option<i64>,
    /// `Seconds`, `Minutes`, `Hours` or `Days`.
    pub duration_type: Option<String>,
    /// Price, in units of `cost_unit_type`.
    pub cost_units: Option<f64>,
    /// Currency or unit the cost is expressed in.
    pub cost_unit_type: Option<String>,
    /// Delivery format.
    pub format: Option<String>,
    /// Difficulty level.
    pub difficulty: Option<String>,
    /// Video for the course, if any.
    pub video_url: Option<String>,
    /// Creation timestamp as sent by the server.
    pub created_at: Option<String>,
    /// Last modification timestamp as sent by the server.
    pub modified_at: Option<String>,
}

/// Client for the `content/courses` collection.
///
/// Obtained from [`Client::courses`](crate::Client::courses). Every method
/// returns the classified [`Response`] untouched.
#[derive(Clone)]
pub struct Courses<T: Transport = HttpTransport> {
    request: Request<T>,
    config: Config,
}

impl<T: Transport> Courses<T> {
    /// Creates a courses client.
    pub fn new(request: Request<T>, config: Config) -> Self {
        Self { request, config }
    }

    /// Creates a course.
    ///
    /// See <https://api.degreed.com/docs/#create-a-new-course>.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] or [`Error::InvalidInteger`] without
    /// sending anything if `course` is incomplete or its duration is not an
    /// integer. Otherwise any request or classification error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use degreed::{Client, NewCourse};
    ///
    /// # async fn example() -> Result<(), degreed::Error> {
    /// let client = Client::new("someoauthtoken")?;
    /// let response = client
    ///     .courses()
    ///     .create(
    ///         NewCourse::new()
    ///             .title("New Course")
    ///             .external_id("arstaroisen")
    ///             .url("https://dev.lessonly.com")
    ///             .duration(200)
    ///             .duration_type("Seconds"),
    ///     )
    ///     .await?;
    ///
    /// assert_eq!(response.code(), 201);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, course: NewCourse) -> Result<Response> {
        let document = COURSES.document(None, course.into_attributes()?);
        self.request
            .post(&self.collection_url(), Some(&document))
            .await
    }

    /// Lists courses, optionally filtered by external id.
    ///
    /// The filter is sent as `filter[external_id]`. With no filter the query
    /// parameter is omitted entirely. Only the first page is fetched; see
    /// [`Response::next_link`].
    ///
    /// See <https://api.degreed.com/docs/#get-all-courses>.
    pub async fn all(&self, external_id: Option<&str>) -> Result<Response> {
        let query = external_id.map(|id| ("filter[external_id]", id));
        self.request.get(&self.collection_url(), query).await
    }

    /// Updates a course.
    ///
    /// Keys may be given as `duration_type` or `duration-type`. Only `title`,
    /// `url`, `duration`, `duration-type`, `obsolete` and `summary` are sent;
    /// anything else is dropped silently.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use degreed::Client;
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), degreed::Error> {
    /// let client = Client::new("someoauthtoken")?;
    /// client
    ///     .courses()
    ///     .update("foo", [("title", json!("Renamed")), ("duration_type", json!("Minutes"))])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update<K, V>(&self, id: &str, attributes: impl IntoIterator<Item = (K, V)>) -> Result<Response>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        let url = self.item_url(id)?;
        let document = COURSES.document(Some(id), COURSES.updatable_attributes(attributes));
        self.request.patch(&url, Some(&document)).await
    }

    /// Deletes a course.
    pub async fn destroy(&self, id: &str) -> Result<Response> {
        let url = self.item_url(id)?;
        self.request.delete(&url).await
    }

    fn collection_url(&self) -> String {
        self.config.url_for(COURSES.collection)
    }

    fn item_url(&self, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(Error::MissingParameter("id"));
        }

        let mut url = Url::parse(&self.collection_url())?;
        url.path_segments_mut()
            .map_err(|_| Error::ConfigurationError("Base URL cannot carry a path".to_string()))?
            .push(id);
        Ok(url.into())
    }
}
