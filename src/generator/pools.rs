//! Static value pools sampled by the generator.

pub(super) const QUALIFICATIONS: [&str; 9] = [
    "High School Diploma",
    "Associate Degree",
    "Bachelor's Degree",
    "Master's Degree",
    "PhD",
    "Registered Nurse (RN)",
    "Certified Nursing Assistant (CNA)",
    "Medical Assistant Certification",
    "Licensed Practical Nurse (LPN)",
];

pub(super) const FIRST_NAMES: [&str; 48] = [
    "Aaron", "Abigail", "Adrian", "Alice", "Andre", "Angela", "Benjamin", "Brenda",
    "Carlos", "Caroline", "Daniel", "Denise", "Edward", "Elena", "Francis", "Gloria",
    "Gregory", "Hannah", "Isaac", "Janet", "Jerome", "Julia", "Kevin", "Laura",
    "Marcus", "Maria", "Nathan", "Nicole", "Oscar", "Patricia", "Raymond", "Rebecca",
    "Samuel", "Sandra", "Terrence", "Theresa", "Victor", "Wendy", "William", "Yolanda",
    "Zachary", "Monica", "Howard", "Irene", "Leon", "Tamara", "Curtis", "Diane",
];

pub(super) const LAST_NAMES: [&str; 48] = [
    "Adams", "Alvarez", "Baker", "Bennett", "Brooks", "Campbell", "Carter", "Chen",
    "Collins", "Diaz", "Edwards", "Evans", "Fisher", "Flores", "Garcia", "Gonzalez",
    "Gray", "Hall", "Harris", "Hughes", "Jackson", "Jenkins", "Kim", "Lee",
    "Lopez", "Martin", "Mitchell", "Morgan", "Nguyen", "Parker", "Patel", "Perez",
    "Phillips", "Reed", "Rivera", "Roberts", "Sanders", "Scott", "Stewart", "Thompson",
    "Torres", "Turner", "Walker", "Ward", "Watson", "Williams", "Wright", "Young",
];
