//! Compiled-in default term dictionaries. These ship with the binary and are
//! what you get when no override file is supplied; every table here can be
//! replaced wholesale through the configuration surface.

/// Version string of the builtin tables, echoed into every Analysis Result
/// so downstream consumers can tell which dictionary scored a document.
pub const BUILTIN_VERSION: &str = "builtin-2025.2";

/// Technical keywords ATS systems commonly index for engineering roles.
pub const TECHNICAL_TERMS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "c++",
    "rust",
    "sql",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "spring",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "git",
    "jenkins",
    "ci/cd",
    "agile",
    "scrum",
    "api",
    "rest",
    "graphql",
    "microservices",
    "machine learning",
    "ai",
    "data science",
    "analytics",
    "database",
    "postgresql",
    "mongodb",
    "redis",
    "elasticsearch",
    "kafka",
    "rabbitmq",
    "terraform",
    "ansible",
    "linux",
    "unix",
];

pub const SOFT_SKILL_TERMS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "collaboration",
    "problem solving",
    "critical thinking",
    "adaptability",
    "time management",
    "project management",
    "mentoring",
    "training",
    "presentation",
    "negotiation",
    "customer service",
    "analytical",
    "creative",
    "innovative",
    "detail oriented",
    "self motivated",
];

pub const INDUSTRY_TERMS: &[&str] = &[
    "fintech",
    "healthcare",
    "e-commerce",
    "saas",
    "startup",
    "enterprise",
    "cybersecurity",
    "devops",
    "cloud computing",
    "mobile development",
    "web development",
    "full stack",
    "frontend",
    "backend",
    "database administration",
];

/// Past-tense verbs that open a strong achievement bullet.
pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "developed",
    "implemented",
    "managed",
    "led",
    "created",
    "designed",
    "improved",
    "increased",
    "reduced",
    "optimized",
    "delivered",
    "executed",
    "coordinated",
    "facilitated",
    "established",
    "built",
    "launched",
    "streamlined",
];

/// Phrases that date a resume or disclose details automated screens are
/// trained to discount. Matched word-boundary, case-insensitive.
pub const DISCOURAGED_PHRASES: &[&str] = &[
    "objective",
    "references available upon request",
    "hobbies",
    "personal interests",
    "marital status",
    "age",
    "date of birth",
    "photo",
    "picture",
];

/// Synonym table for canonical section resolution. A detected section name
/// matches a canonical section when its lowercased form contains any listed
/// synonym as a substring ("Professional Experience" resolves via
/// "experience", "Work History" via "work history").
pub const SECTION_SYNONYMS: &[(&str, &[&str])] = &[
    ("Summary", &["summary", "profile", "about me", "objective"]),
    (
        "Experience",
        &["experience", "employment", "work history"],
    ),
    (
        "Education",
        &["education", "academic", "qualifications"],
    ),
    (
        "Skills",
        &["skills", "competencies", "expertise", "proficiencies"],
    ),
    (
        "Certifications",
        &["certification", "certificate", "credentials"],
    ),
];

/// Quantification pattern: numerals, percentages, currency, or magnitude
/// words anywhere in a bullet.
pub const QUANTIFIER_PATTERN: &str =
    r"(?i)[0-9%$€£]|\b(?:millions?|billions?|thousands?|percent|dozens?|hundreds?)\b";
