//! # Léxico e Gazetteers (Inglês)
//!
//! Listas fechadas usadas pelo anotador baseado em regras: abreviações (tokenizador
//! e segmentador), palavras de classe fechada com sua tag Penn (tagger) e listas de
//! entidades conhecidas (chunker).
//!
//! Todas as entradas estão em minúsculas, pois o texto do corpus é normalizado
//! para minúsculas no carregamento.

use std::collections::{HashMap, HashSet};

/// Abreviações cujo ponto não encerra a sentença.
pub const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "mt.", "gen.",
    "col.", "capt.", "lt.", "sgt.", "rev.", "gov.", "sen.", "rep.", "hon.",
    "vs.", "etc.", "e.g.", "i.e.", "a.m.", "p.m.", "vol.", "fig.", "inc.",
    "ltd.", "co.", "corp.", "dept.", "approx.", "u.s.", "u.k.",
    // "mar.", "sat.", "sun." e "wed." ficam de fora: colidem com palavras comuns
    "jan.", "feb.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.",
    "nov.", "dec.", "tue.", "thu.", "fri.",
];

/// Clíticos separados pelo tokenizador (ex: "don't" -> "do", "n't").
pub const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

pub const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
];

pub const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Títulos que precedem nomes de pessoas
pub const PERSON_TITLES: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sir", "lady", "lord", "king", "queen",
    "prince", "princess", "president", "senator", "governor", "captain", "general",
    "colonel", "judge", "professor", "uncle", "aunt", "miss", "madam", "saint",
    "st.", "gen.", "col.", "capt.", "rev.", "gov.", "sen.",
];

/// Moedas que seguem um número ("5 dollars")
pub const CURRENCY_WORDS: &[&str] = &[
    "dollar", "dollars", "euro", "euros", "pound", "pounds", "cent", "cents",
    "yen", "francs", "shillings", "pence", "guineas",
];

pub const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen", "twenty", "thirty", "forty", "fifty", "sixty",
    "seventy", "eighty", "ninety", "hundred", "thousand", "million", "billion",
];

/// Palavras de classe fechada e verbos/adjetivos frequentes com sua tag Penn.
const CLOSED_CLASS: &[(&str, &[&str])] = &[
    ("DT", &[
        "the", "a", "an", "this", "that", "these", "those", "every", "each", "some",
        "any", "no", "all", "both", "another", "either", "neither", "such",
    ]),
    ("PRP", &[
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
        "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves",
    ]),
    ("PRP$", &["my", "your", "his", "her", "its", "our", "their"]),
    ("IN", &[
        "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "from", "of", "off",
        "over", "under", "than", "since", "until", "because", "although", "though",
        "if", "whether", "as", "like", "near", "without", "within", "upon", "across",
        "toward", "towards", "among", "around", "behind", "beyond", "while", "unless",
        "per", "via", "onto", "despite", "throughout", "beside", "besides",
    ]),
    ("TO", &["to"]),
    ("CC", &["and", "or", "but", "nor", "yet", "plus"]),
    ("MD", &["can", "could", "may", "might", "must", "shall", "should", "will", "would"]),
    ("VB", &[
        "be", "have", "do", "go", "say", "make", "take", "see", "know", "get", "give",
        "find", "think", "tell", "become", "leave", "feel", "bring", "begin", "keep",
        "hold", "write", "stand", "hear", "let", "mean", "meet", "run", "pay", "sit",
        "speak", "lead", "read", "grow", "lose", "fall", "send", "build", "understand",
        "draw", "break", "spend", "cut", "rise", "drive", "buy", "wear", "choose",
        "come", "want", "look", "use", "work", "call", "try", "ask", "need", "seem",
    ]),
    ("VBZ", &["is", "has", "does", "says", "goes"]),
    ("VBP", &["are", "am"]),
    ("VBD", &[
        "was", "were", "had", "did", "went", "said", "came", "took", "made", "saw",
        "knew", "got", "gave", "found", "thought", "told", "became", "left", "felt",
        "brought", "began", "kept", "held", "wrote", "stood", "heard", "meant", "met",
        "ran", "paid", "sat", "spoke", "led", "grew", "lost", "fell", "sent", "built",
        "understood", "drew", "broke", "spent", "rose", "drove", "bought", "wore",
        "chose", "won", "ate", "slept", "taught", "caught", "fought", "sang", "swam",
    ]),
    ("VBN", &["been", "done", "gone", "seen", "known", "given", "taken", "written", "spoken", "born"]),
    ("VBG", &["being", "having", "doing"]),
    ("WDT", &["which", "whatever", "whichever"]),
    ("WP", &["who", "whom", "what", "whoever"]),
    ("WP$", &["whose"]),
    ("WRB", &["where", "when", "why", "how", "whenever", "wherever"]),
    ("EX", &["there"]),
    ("RB", &[
        "not", "never", "very", "also", "too", "just", "only", "now", "then", "here",
        "always", "often", "still", "already", "again", "soon", "ever", "quite",
        "almost", "perhaps", "rather", "even", "once", "twice", "away", "back", "so",
        "yesterday", "today", "tomorrow", "tonight", "ago", "else", "however", "indeed",
    ]),
    ("RP", &["up", "out", "down"]),
    ("UH", &["oh", "yes", "hello", "alas", "ah", "hey", "ok", "okay", "well"]),
    ("JJ", &[
        "good", "new", "first", "last", "long", "great", "little", "own", "other", "old",
        "right", "big", "high", "different", "small", "large", "next", "early", "young",
        "important", "few", "public", "bad", "same", "able", "many", "much", "more",
        "most", "less", "least", "several", "whole", "true", "free", "full", "late",
        "poor", "rich", "dear", "happy", "kind", "dark", "short", "fine", "sure",
    ]),
];

/// Léxico de palavras de classe fechada: palavra -> tag Penn.
pub fn closed_class() -> HashMap<&'static str, &'static str> {
    let mut map = HashMap::new();
    for (tag, words) in CLOSED_CLASS {
        for word in *words {
            // A primeira lista que menciona a palavra vence ("that" fica DT)
            map.entry(*word).or_insert(*tag);
        }
    }
    map
}

/// Listas de gazetteer para o chunker de entidades.
///
/// Nomes de um único token ficam em `HashSet`s; nomes compostos ficam como
/// n-gramas (`Vec<String>`), no mesmo esquema do motor de regras.
#[derive(Debug, Clone)]
pub struct Gazetteers {
    pub persons: HashSet<String>,
    pub locations: HashSet<String>,
    pub organizations: HashSet<String>,
    pub facilities: HashSet<String>,
    pub person_ngrams: Vec<Vec<String>>,
    pub location_ngrams: Vec<Vec<String>>,
    pub organization_ngrams: Vec<Vec<String>>,
    pub facility_ngrams: Vec<Vec<String>>,
}

impl Gazetteers {
    pub fn new() -> Self {
        Self {
            persons: HashSet::new(),
            locations: HashSet::new(),
            organizations: HashSet::new(),
            facilities: HashSet::new(),
            person_ngrams: Vec::new(),
            location_ngrams: Vec::new(),
            organization_ngrams: Vec::new(),
            facility_ngrams: Vec::new(),
        }
    }

    /// Gazetteers em inglês com nomes frequentes em textos literários e jornalísticos.
    pub fn english() -> Self {
        let mut gaz = Self::new();
        for name in [
            "john", "mary", "james", "robert", "michael", "william", "david", "richard",
            "joseph", "thomas", "charles", "elizabeth", "sarah", "jane", "emma", "anna",
            "george", "henry", "edward", "alice", "peter", "paul", "lucy", "catherine",
            "margaret", "harry", "oliver", "jack", "charlotte", "emily", "smith",
            "johnson", "williams", "brown", "jones", "miller", "davis", "wilson",
            "taylor", "clark", "darcy", "bennet", "bingley", "holmes", "watson",
            "austen", "dickens", "shakespeare", "napoleon", "churchill", "lincoln",
        ] {
            gaz.add_person(name);
        }
        for place in [
            "london", "paris", "england", "france", "america", "germany", "italy",
            "spain", "china", "japan", "india", "russia", "canada", "europe", "africa",
            "asia", "boston", "chicago", "rome", "berlin", "madrid", "scotland",
            "ireland", "wales", "texas", "california", "brazil", "mexico", "egypt",
            "australia", "dublin", "edinburgh", "oxford", "cambridge", "vienna",
            "new york", "united states", "united kingdom", "los angeles",
            "san francisco", "south africa", "hong kong", "new orleans",
        ] {
            gaz.add_location(place);
        }
        for org in [
            "nasa", "unesco", "fbi", "cia", "bbc", "ibm", "google", "microsoft",
            "congress", "parliament", "nato", "unicef",
            "united nations", "european union", "world bank", "bank of england",
            "red cross", "royal navy", "supreme court", "house of commons",
            "house of lords", "east india company",
        ] {
            gaz.add_org(org);
        }
        for facility in [
            "louvre", "heathrow", "kremlin", "colosseum",
            "white house", "eiffel tower", "golden gate bridge", "tower bridge",
            "big ben", "british museum", "empire state building", "brooklyn bridge",
        ] {
            gaz.add_facility(facility);
        }
        gaz
    }

    pub fn add_person(&mut self, name: &str) {
        insert_name(&mut self.persons, &mut self.person_ngrams, name);
    }

    pub fn add_location(&mut self, name: &str) {
        insert_name(&mut self.locations, &mut self.location_ngrams, name);
    }

    pub fn add_org(&mut self, name: &str) {
        insert_name(&mut self.organizations, &mut self.organization_ngrams, name);
    }

    pub fn add_facility(&mut self, name: &str) {
        insert_name(&mut self.facilities, &mut self.facility_ngrams, name);
    }

    /// Verdadeiro se a palavra pertence a qualquer gazetteer de token único.
    pub fn contains(&self, word: &str) -> bool {
        self.persons.contains(word)
            || self.locations.contains(word)
            || self.organizations.contains(word)
            || self.facilities.contains(word)
    }

    /// Verdadeiro se a palavra aparece em algum n-grama de nome composto.
    pub fn in_ngram(&self, word: &str) -> bool {
        [
            &self.person_ngrams,
            &self.location_ngrams,
            &self.organization_ngrams,
            &self.facility_ngrams,
        ]
        .iter()
        .any(|ngrams| ngrams.iter().any(|parts| parts.iter().any(|p| p == word)))
    }
}

impl Default for Gazetteers {
    fn default() -> Self {
        Self::english()
    }
}

fn insert_name(singles: &mut HashSet<String>, ngrams: &mut Vec<Vec<String>>, name: &str) {
    let parts: Vec<String> = name.split_whitespace().map(|p| p.to_lowercase()).collect();
    match parts.len() {
        0 => {}
        1 => {
            singles.insert(parts[0].clone());
        }
        _ => ngrams.push(parts),
    }
}

pub fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(&word)
}

pub fn is_month(word: &str) -> bool {
    MONTHS.contains(&word)
}

pub fn is_weekday(word: &str) -> bool {
    WEEKDAYS.contains(&word)
}
