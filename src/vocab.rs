//! Bounded vocabularies for synthetic identity generation.
//!
//! These tables put a hard ceiling on the candidate space: the name-pair
//! space is `FIRST_NAMES.len() * LAST_NAMES.len()` and the phone space is
//! the 9000 values of `555-1000..=555-9999`. Callers requesting more unique
//! identities than the vocabulary supports get a typed exhaustion error
//! from the pool rather than a hung retry loop.

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Nancy", "Daniel", "Lisa", "Matthew", "Betty", "Anthony",
    "Helen", "Mark", "Sandra", "Donald", "Donna", "Steven", "Carol", "Kenneth", "Ruth", "Paul",
    "Sharon", "Joshua", "Michelle", "Kevin", "Laura", "Brian", "Emily", "George", "Kimberly",
    "Edward", "Deborah", "Ronald", "Dorothy", "Timothy", "Amy", "Jason", "Angela", "Jeffrey",
    "Ashley", "Ryan", "Brenda", "Jacob", "Emma", "Gary", "Virginia", "Nicholas", "Pamela",
    "Eric", "Martha", "Jonathan", "Debra", "Stephen", "Amanda", "Larry", "Stephanie", "Justin",
    "Janet", "Scott", "Carolyn", "Brandon", "Christine", "Benjamin", "Marie", "Samuel",
    "Catherine", "Frank", "Frances", "Gregory", "Christina", "Raymond", "Samantha", "Alexander",
    "Nicole", "Patrick", "Rebecca", "Jack", "Julia", "Dennis", "Judy", "Jerry", "Teresa",
    "Tyler", "Janice", "Aaron", "Kelly", "Jose", "Madison", "Nathan", "Grace", "Adam", "Sophia",
    "Henry", "Victoria", "Douglas", "Olivia", "Zachary", "Isabella", "Peter", "Megan", "Kyle",
    "Charlotte", "Noah", "Evelyn", "Ethan", "Abigail", "Jeremy", "Hannah", "Walter", "Rachel",
    "Keith", "Chloe", "Christian", "Mia", "Austin", "Katherine", "Roger", "Sara", "Sean",
    "Diana", "Carl", "Andrea", "Gerald", "Brittany", "Harold", "Natalie", "Jordan", "Julie",
    "Albert", "Anna", "Willie", "Jacqueline", "Wayne", "Joyce", "Mason", "Maria", "Vincent",
    "Joan", "Ralph", "Heather", "Eugene", "Denise", "Russell", "Diane",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Gomez", "Phillips", "Evans",
    "Turner", "Diaz", "Parker", "Cruz", "Edwards", "Collins", "Reyes", "Stewart", "Morris",
    "Morales", "Murphy", "Cook", "Rogers", "Gutierrez", "Ortiz", "Morgan", "Cooper", "Peterson",
    "Bailey", "Reed", "Kelly", "Howard", "Ramos", "Kim", "Cox", "Ward", "Richardson", "Watson",
    "Brooks", "Chavez", "Wood", "James", "Bennett", "Gray", "Mendoza", "Ruiz", "Hughes",
    "Price", "Alvarez", "Castillo", "Sanders", "Patel", "Myers", "Long", "Ross", "Foster",
    "Jimenez", "Powell", "Jenkins", "Perry", "Russell", "Sullivan", "Bell", "Coleman", "Butler",
    "Henderson", "Barnes", "Gonzales", "Fisher", "Vasquez", "Simmons", "Romero", "Jordan",
    "Patterson", "Alexander", "Hamilton", "Graham", "Reynolds", "Griffin", "Wallace", "Moreno",
    "West", "Cole", "Hayes", "Bryant", "Herrera", "Gibson", "Ellis", "Tran", "Medina",
    "Aguilar", "Stevens", "Murray", "Ford", "Castro", "Marshall", "Owens", "Harrison",
    "Fernandez", "McDonald", "Woods", "Washington", "Kennedy", "Wells", "Vargas", "Henry",
    "Chen",
];

/// `(city, state, zip)` triples; drawn as a unit so city/state/zip stay
/// consistent within one identity.
pub const CITIES: &[(&str, &str, &str)] = &[
    ("San Francisco", "CA", "94102"),
    ("Los Angeles", "CA", "90001"),
    ("New York", "NY", "10001"),
    ("Chicago", "IL", "60601"),
    ("Houston", "TX", "77001"),
    ("Phoenix", "AZ", "85001"),
    ("Philadelphia", "PA", "19101"),
    ("San Antonio", "TX", "78201"),
    ("San Diego", "CA", "92101"),
    ("Dallas", "TX", "75201"),
    ("San Jose", "CA", "95101"),
    ("Austin", "TX", "78701"),
    ("Jacksonville", "FL", "32201"),
    ("Columbus", "OH", "43201"),
    ("Charlotte", "NC", "28201"),
    ("Indianapolis", "IN", "46201"),
    ("Fort Worth", "TX", "76101"),
    ("Seattle", "WA", "98101"),
    ("Denver", "CO", "80201"),
    ("Washington", "DC", "20001"),
    ("Boston", "MA", "02101"),
    ("Nashville", "TN", "37201"),
    ("Detroit", "MI", "48201"),
    ("Portland", "OR", "97201"),
    ("Las Vegas", "NV", "89101"),
    ("Milwaukee", "WI", "53201"),
    ("Albuquerque", "NM", "87101"),
    ("Tucson", "AZ", "85701"),
    ("Fresno", "CA", "93701"),
    ("Sacramento", "CA", "95801"),
    ("Kansas City", "MO", "64101"),
    ("Omaha", "NE", "68101"),
    ("Raleigh", "NC", "27601"),
    ("Miami", "FL", "33101"),
    ("Cleveland", "OH", "44101"),
    ("Virginia Beach", "VA", "23451"),
    ("Atlanta", "GA", "30301"),
    ("Oakland", "CA", "94601"),
    ("Minneapolis", "MN", "55401"),
    ("Tampa", "FL", "33601"),
    ("Honolulu", "HI", "96801"),
    ("Anaheim", "CA", "92801"),
];

pub const EMPLOYERS: &[&str] = &[
    "Tech Solutions Inc", "Global Marketing Corp", "Financial Advisory LLC", "Healthcare Partners",
    "Law Associates", "Education First", "Construction Co", "Retail Giants", "Auto Industries",
    "Media Productions", "Tech Startup", "Fashion House", "Investment Bank", "Real Estate Group",
    "Insurance Corp", "Consulting Firm", "Energy Company", "Biotech Labs", "Aerospace Corp",
    "Publishing House", "Sports Management", "Food Services", "Security Firm", "Travel Agency",
    "Music Label", "Art Gallery", "Gaming Studio", "Pharmacy Chain", "Logistics Co",
    "Hotel Chain", "Airlines", "University", "Hospital Network", "Nonprofit Org",
    "Architecture Firm", "Accounting Firm", "Film Studio", "Telecom Company", "Retail Chain",
];

pub const OCCUPATIONS: &[&str] = &[
    "Software Engineer", "Marketing Director", "Financial Analyst", "Physician", "Attorney",
    "Teacher", "Project Manager", "Store Manager", "Mechanical Engineer", "Producer",
    "CEO", "Designer", "Banker", "Real Estate Agent", "Underwriter", "Consultant",
    "Engineer", "Research Scientist", "Systems Analyst", "Editor", "Agent",
    "Restaurant Owner", "Security Consultant", "Travel Agent", "Game Developer",
    "Pharmacist", "Operations Manager", "Hotel Manager", "Pilot", "Professor",
    "Administrator", "Director", "Architect", "CPA", "Network Engineer",
    "Regional Manager", "Product Manager", "Creative Director", "Site Supervisor", "Partner",
];

pub const STREET_NAMES: &[&str] = &[
    "Oak", "Pine", "Elm", "Maple", "Cedar", "Birch", "Spruce", "Willow", "Ash", "Poplar",
];

pub const STREET_TYPES: &[&str] = &[
    "Street", "Avenue", "Drive", "Lane", "Road", "Court", "Way", "Boulevard", "Place", "Circle",
];

pub const UNIT_TYPES: &[&str] = &["Apt", "Suite", "Unit", "Floor"];

pub const UNIT_SUFFIXES: &[&str] = &["", "A", "B", "C", "D"];

/// Number of distinct `(first, last)` name pairs the vocabulary supports.
pub fn name_pair_space() -> usize {
    FIRST_NAMES.len() * LAST_NAMES.len()
}
