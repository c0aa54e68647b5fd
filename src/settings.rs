use std::fmt::Display;

/// The package document generation to validate against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EpubVersion {
    /// EPUB `2.0.1` (including OEBPS 1.2 compatible packages) **(Legacy)**
    Epub2,
    /// EPUB `3.*`
    #[default]
    Epub3,
}

impl EpubVersion {
    pub fn is_epub2(&self) -> bool {
        matches!(self, Self::Epub2)
    }

    pub fn is_epub3(&self) -> bool {
        matches!(self, Self::Epub3)
    }

    /// Maps the raw `version` attribute of a `package` element to a generation.
    ///
    /// Returns [`None`] if the major version is not `2` or `3`.
    ///
    /// ```
    /// # use opfcheck::EpubVersion;
    /// assert_eq!(Some(EpubVersion::Epub2), EpubVersion::from_attribute("2.0"));
    /// assert_eq!(Some(EpubVersion::Epub3), EpubVersion::from_attribute(" 3.3 "));
    /// assert_eq!(None, EpubVersion::from_attribute("1.2"));
    /// ```
    pub fn from_attribute(raw: &str) -> Option<Self> {
        match raw.trim().split('.').next()?.parse::<u8>().ok()? {
            2 => Some(Self::Epub2),
            3 => Some(Self::Epub3),
            _ => None,
        }
    }
}

impl Display for EpubVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Epub2 => "2.0",
            Self::Epub3 => "3.0",
        })
    }
}

/// Settings shared by [`PackageBuilder`](crate::PackageBuilder) and
/// [`Validator`](crate::Validator).
///
/// # Examples
/// ```
/// # use opfcheck::{CheckSettings, EpubVersion};
/// let settings = CheckSettings::builder()
///     .version(EpubVersion::Epub2)
///     .package_path("OPS/package.opf")
///     .build();
///
/// assert_eq!("OPS/package.opf", settings.package_path);
/// assert_eq!(256, settings.max_fallback_depth);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckSettings {
    /// The rule set to validate with.
    ///
    /// Default: [`EpubVersion::Epub3`]
    pub version: EpubVersion,
    /// Location of the package document within its container.
    ///
    /// Relative `href`s are resolved against this path,
    /// and it is the path stamped on every diagnostic about the package.
    ///
    /// Default: `"OEBPS/content.opf"`
    pub package_path: String,
    /// Upper bound on the number of hops followed through a fallback chain.
    ///
    /// Cycles are detected independently; this only guards against
    /// pathologically long acyclic chains.
    ///
    /// Default: `256`
    pub max_fallback_depth: usize,
    /// Emit [`Severity::Info`](crate::Severity::Info) feature diagnostics
    /// (declared media types, Dublin Core values, item counts, ...).
    ///
    /// Default: `true`
    pub report_features: bool,
}

impl CheckSettings {
    /// Returns a builder to create a [`CheckSettings`] instance.
    pub fn builder() -> CheckSettingsBuilder {
        CheckSettingsBuilder(Self::default())
    }
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            version: EpubVersion::Epub3,
            package_path: String::from("OEBPS/content.opf"),
            max_fallback_depth: 256,
            report_features: true,
        }
    }
}

impl From<CheckSettingsBuilder> for CheckSettings {
    fn from(value: CheckSettingsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct a [`CheckSettings`] instance.
#[derive(Debug, Clone)]
pub struct CheckSettingsBuilder(CheckSettings);

impl CheckSettingsBuilder {
    /// Turn this builder into a [`CheckSettings`] instance.
    pub fn build(self) -> CheckSettings {
        self.0
    }

    /// See [`CheckSettings::version`].
    pub fn version(mut self, version: EpubVersion) -> Self {
        self.0.version = version;
        self
    }

    /// See [`CheckSettings::package_path`].
    pub fn package_path(mut self, path: impl Into<String>) -> Self {
        self.0.package_path = path.into();
        self
    }

    /// See [`CheckSettings::max_fallback_depth`].
    pub fn max_fallback_depth(mut self, depth: usize) -> Self {
        self.0.max_fallback_depth = depth;
        self
    }

    /// See [`CheckSettings::report_features`].
    pub fn report_features(mut self, report_features: bool) -> Self {
        self.0.report_features = report_features;
        self
    }
}
