pub const MODEL_API_KEY_ENV_NAME: &str = "STORYCARD_MODEL_API_KEY";

/// Title returned whenever no candidate text survives extraction.
pub const FALLBACK_TITLE: &str = "A story of inequality";

pub const DEFAULT_MAX_WORDS: usize = 7;

/// Number of best-scored sentences the phrase selector looks at.
pub const TOP_SENTENCES: usize = 5;

/// Shortest word window the phrase selector generates.
pub const MIN_WINDOW_WORDS: usize = 4;

pub const MIN_SENTENCE_CHARS: usize = 15;
pub const MAX_SENTENCE_CHARS: usize = 150;

/// Stories at or below this length are dropped by the analysis export filter.
pub const MIN_ANALYSIS_STORY_CHARS: usize = 20;

pub const OTHER_THEME: &str = "Other";

/// Rows fetched from the database per batch by every stage.
pub const FETCH_BATCH_SIZE: u32 = 100;

pub(crate) const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";

pub(crate) const DEFAULT_HEADLINE_PROMPT_TEMPLATE: &str = r#"
You are provided with a personal narrative.
Craft a concise, first-person sentence (about 5 to 7 words) that the narrator might say,
reflecting the core theme or experience of the narrative.
Ensure the sentence is in first-person perspective and encapsulates the main point.
Answer with the sentence only.

Narrative: {text}"#;

pub(crate) const COUNTRY_PROMPT_TEMPLATE: &str = r#"
You are given a personal narrative. Based on the clues within the narrative,
determine the country the narrator is based in. If there is insufficient evidence,
simply return 'Unknown'. Answer with the country name only.

Narrative: {text}"#;

pub(crate) const FIRST_PERSON_WORDS: &[&str] = &["i", "my", "we", "our"];

pub(crate) const IMPACT_WORDS: &[&str] = &[
    "discrimination",
    "inequality",
    "unfair",
    "struggle",
    "fight",
    "challenge",
    "overcome",
    "ignored",
    "excluded",
    "bias",
    "sexist",
    "racist",
    "marginalized",
    "denied",
    "refused",
    "dismissed",
    "rejected",
    "stereotype",
    "barrier",
    "glass ceiling",
    "undervalued",
    "overlooked",
    "invisible",
    "silence",
    "oppression",
    "privilege",
    "wrong",
    "pain",
    "fear",
    "anger",
    "strength",
    "power",
    "resilience",
    "brave",
    "journey",
    "hope",
    "dream",
    "isolated",
    "abuse",
    "forced",
    "endured",
    "battled",
];

pub(crate) const STOP_WORDS: &[&str] = &[
    "and", "the", "a", "an", "in", "on", "at", "to", "for", "with", "by", "that", "this", "was",
    "were", "is", "are", "be", "been", "being", "have", "has", "had", "do", "does", "did", "but",
    "if", "or", "because", "as", "until", "while", "of", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "from", "up", "down", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "s", "t", "can", "will", "just", "don", "should", "now", "d", "ll",
    "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven",
    "isn", "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
    "also", "however", "therefore", "thus", "hence", "meanwhile", "nevertheless", "nonetheless",
    "instead", "moreover", "furthermore",
];

pub(crate) const KEY_PHRASES: &[&str] = &[
    "gender inequality",
    "gender bias",
    "gender stereotypes",
    "glass ceiling",
    "gender roles",
    "equal pay",
    "sexual harassment",
    "gender discrimination",
    "equal opportunity",
    "gender gap",
    "sexist attitudes",
    "hidden inequalities",
];

pub(crate) const FILLER_PHRASES: &[&str] = &[
    "I learned that",
    "I realized that",
    "I found that",
    "I discovered that",
    "it was clear that",
    "it became apparent that",
    "I understood that",
    "it was obvious that",
    "I noticed that",
    "I think that",
    "I believe that",
    "it seems that",
    "it appeared that",
    "it turns out that",
    "it is true that",
    "the fact is that",
    "the truth is that",
    "it is important to note that",
    "I would say that",
    "one might say that",
    "you could say that",
    "it was interesting that",
    "interestingly,",
    "surprisingly,",
    "remarkably,",
];

pub(crate) const LEADING_FILLERS: &[&str] =
    &["and", "but", "so", "that", "because", "the", "a", "an"];

pub(crate) const THEMES: &[(&str, &[&str])] = &[
    (
        "Workplace",
        &[
            "job",
            "work",
            "career",
            "office",
            "boss",
            "colleague",
            "workplace",
            "company",
            "salary",
            "pay",
            "manager",
            "employee",
        ],
    ),
    (
        "Education",
        &[
            "school",
            "college",
            "university",
            "class",
            "student",
            "teacher",
            "professor",
            "education",
            "learn",
            "study",
            "academic",
        ],
    ),
    (
        "Domestic",
        &[
            "home",
            "family",
            "husband",
            "wife",
            "child",
            "children",
            "household",
            "domestic",
            "marriage",
            "parent",
            "father",
            "mother",
        ],
    ),
    (
        "Healthcare",
        &[
            "doctor",
            "nurse",
            "hospital",
            "medical",
            "health",
            "patient",
            "care",
            "treatment",
            "clinic",
        ],
    ),
    (
        "Public Space",
        &[
            "street",
            "public",
            "restaurant",
            "store",
            "shop",
            "mall",
            "transit",
            "bus",
            "train",
            "car",
            "driving",
        ],
    ),
    (
        "Cultural",
        &[
            "tradition",
            "culture",
            "religion",
            "community",
            "society",
            "norm",
            "belief",
            "custom",
            "expectation",
        ],
    ),
    (
        "Identity",
        &[
            "transgender",
            "gender",
            "identity",
            "lgbtq",
            "woman",
            "man",
            "girl",
            "boy",
            "feminine",
            "masculine",
        ],
    ),
];

pub(crate) const COUNTRY_SYNONYMS: &[(&str, &str)] = &[
    ("usa", "United States"),
    ("us", "United States"),
    ("america", "United States"),
    ("u.s.a", "United States"),
    ("uk", "United Kingdom"),
    ("england", "United Kingdom"),
    ("scotland", "United Kingdom"),
    ("wales", "United Kingdom"),
    ("nepal", "Nepal"),
    ("india", "India"),
    ("australia", "Australia"),
    ("canada", "Canada"),
];

pub(crate) const COUNTRIES: &[&str] = &[
    "Afghanistan",
    "Albania",
    "Algeria",
    "Andorra",
    "Angola",
    "Antigua and Barbuda",
    "Argentina",
    "Armenia",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Bahamas",
    "Bahrain",
    "Bangladesh",
    "Barbados",
    "Belarus",
    "Belgium",
    "Belize",
    "Benin",
    "Bhutan",
    "Bolivia",
    "Bosnia and Herzegovina",
    "Botswana",
    "Brazil",
    "Brunei Darussalam",
    "Bulgaria",
    "Burkina Faso",
    "Burundi",
    "Cabo Verde",
    "Cambodia",
    "Cameroon",
    "Canada",
    "Central African Republic",
    "Chad",
    "Chile",
    "China",
    "Colombia",
    "Comoros",
    "Congo",
    "Costa Rica",
    "Croatia",
    "Cuba",
    "Cyprus",
    "Czechia",
    "Denmark",
    "Djibouti",
    "Dominica",
    "Dominican Republic",
    "Ecuador",
    "Egypt",
    "El Salvador",
    "Equatorial Guinea",
    "Eritrea",
    "Estonia",
    "Eswatini",
    "Ethiopia",
    "Fiji",
    "Finland",
    "France",
    "Gabon",
    "Gambia",
    "Georgia",
    "Germany",
    "Ghana",
    "Greece",
    "Grenada",
    "Guatemala",
    "Guinea",
    "Guinea-Bissau",
    "Guyana",
    "Haiti",
    "Honduras",
    "Hungary",
    "Iceland",
    "India",
    "Indonesia",
    "Iran",
    "Iraq",
    "Ireland",
    "Israel",
    "Italy",
    "Jamaica",
    "Japan",
    "Jordan",
    "Kazakhstan",
    "Kenya",
    "Kiribati",
    "Kuwait",
    "Kyrgyzstan",
    "Latvia",
    "Lebanon",
    "Lesotho",
    "Liberia",
    "Libya",
    "Liechtenstein",
    "Lithuania",
    "Luxembourg",
    "Madagascar",
    "Malawi",
    "Malaysia",
    "Maldives",
    "Mali",
    "Malta",
    "Marshall Islands",
    "Mauritania",
    "Mauritius",
    "Mexico",
    "Moldova",
    "Monaco",
    "Mongolia",
    "Montenegro",
    "Morocco",
    "Mozambique",
    "Myanmar",
    "Namibia",
    "Nauru",
    "Nepal",
    "Netherlands",
    "New Zealand",
    "Nicaragua",
    "Niger",
    "Nigeria",
    "North Macedonia",
    "Norway",
    "Oman",
    "Pakistan",
    "Palau",
    "Panama",
    "Papua New Guinea",
    "Paraguay",
    "Peru",
    "Philippines",
    "Poland",
    "Portugal",
    "Qatar",
    "Romania",
    "Russian Federation",
    "Rwanda",
    "Saint Lucia",
    "Samoa",
    "San Marino",
    "Saudi Arabia",
    "Senegal",
    "Serbia",
    "Seychelles",
    "Sierra Leone",
    "Singapore",
    "Slovakia",
    "Slovenia",
    "Solomon Islands",
    "Somalia",
    "South Africa",
    "South Sudan",
    "Spain",
    "Sri Lanka",
    "Sudan",
    "Suriname",
    "Sweden",
    "Switzerland",
    "Syrian Arab Republic",
    "Tajikistan",
    "Tanzania",
    "Thailand",
    "Timor-Leste",
    "Togo",
    "Tonga",
    "Trinidad and Tobago",
    "Tunisia",
    "Turkey",
    "Turkmenistan",
    "Tuvalu",
    "Uganda",
    "Ukraine",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
    "Uruguay",
    "Uzbekistan",
    "Vanuatu",
    "Venezuela",
    "Viet Nam",
    "Yemen",
    "Zambia",
    "Zimbabwe",
];
