//! Randomized request payloads.
//!
//! Every fixture is valid for the API's required-field contract. Values are
//! random so repeated runs do not collide on unique fields (e-mail), while the
//! shape stays fixed so assertions on field presence remain stable.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Anika", "Bikash", "Chloe", "Dipesh", "Elena", "Farhan", "Gita", "Hiro", "Isla",
    "Jonas", "Kreetika", "Laila", "Mateo", "Nadia", "Oskar", "Priya", "Quinn", "Rohan", "Sofia",
    "Tariq", "Uma", "Viktor", "Wren", "Yara", "Zane",
];

const LAST_NAMES: &[&str] = &[
    "Adhikari", "Bhetuwal", "Carter", "Dahal", "Eriksen", "Fischer", "Gurung", "Haddad",
    "Iyer", "Jensen", "Khan", "Lopez", "Moreau", "Nakamura", "Okafor", "Pandey", "Rossi",
    "Shrestha", "Tanaka", "Usman", "Varga", "Walker", "Young", "Zimmer",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
    "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
    "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
];

/// Gender accepted by the users resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Wire value used in bodies and query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Account status accepted by the users resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub const ALL: [UserStatus; 2] = [UserStatus::Active, UserStatus::Inactive];

    /// Wire value used in bodies and query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

/// Completion state accepted by the todos resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Pending,
    Completed,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 2] = [TodoStatus::Pending, TodoStatus::Completed];
}

/// Body for `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFixture {
    pub name: String,
    pub gender: Gender,
    pub email: String,
    pub status: UserStatus,
}

/// Title and body of a post; the owning `user_id` is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFixture {
    pub title: String,
    pub body: String,
}

impl PostFixture {
    /// Attaches the owning user, producing a `POST /posts` body.
    pub fn for_user(self, user_id: u64) -> NewPost {
        NewPost {
            user_id,
            post: self,
        }
    }
}

/// `POST /posts` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub user_id: u64,
    #[serde(flatten)]
    pub post: PostFixture,
}

/// Comment fields; the parent `post_id` is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentFixture {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl CommentFixture {
    /// Attaches the parent post, producing a `POST /comments` body.
    pub fn for_post(self, post_id: u64) -> NewComment {
        NewComment {
            post_id,
            comment: self,
        }
    }
}

/// `POST /comments` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub post_id: u64,
    #[serde(flatten)]
    pub comment: CommentFixture,
}

/// Todo fields; the owning `user_id` is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFixture {
    pub title: String,
    pub status: TodoStatus,
}

impl TodoFixture {
    /// Attaches the owning user, producing a `POST /todos` body.
    pub fn for_user(self, user_id: u64) -> NewTodo {
        NewTodo {
            user_id,
            todo: self,
        }
    }
}

/// `POST /todos` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    pub user_id: u64,
    #[serde(flatten)]
    pub todo: TodoFixture,
}

/// Fake data source.
///
/// Owns its random generator so tests can seed it; the free functions in this
/// module use a fresh entropy-seeded instance per call.
pub struct Faker {
    rng: StdRng,
}

impl Faker {
    /// Creates a faker seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible faker.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Faker {
    fn default() -> Self {
        Self::new()
    }
}

impl Faker {
    pub fn user(&mut self) -> UserFixture {
        UserFixture {
            name: self.username(),
            gender: self.pick(&Gender::ALL),
            email: self.email(),
            status: self.pick(&UserStatus::ALL),
        }
    }

    pub fn post(&mut self) -> PostFixture {
        PostFixture {
            title: self.sentence(),
            body: self.paragraph(),
        }
    }

    pub fn comment(&mut self) -> CommentFixture {
        CommentFixture {
            name: self.full_name(),
            email: self.email(),
            body: self.sentence(),
        }
    }

    pub fn todo(&mut self) -> TodoFixture {
        TodoFixture {
            title: self.sentence(),
            status: self.pick(&TodoStatus::ALL),
        }
    }

    /// Username such as `Kreetika_Bhetuwal42`.
    pub fn username(&mut self) -> String {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let separator = self.pick(&["", ".", "_"]);
        let suffix: u16 = self.rng.gen_range(1..1000);
        format!("{first}{separator}{last}{suffix}")
    }

    /// Display name such as `Kreetika Bhetuwal`.
    pub fn full_name(&mut self) -> String {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        format!("{first} {last}")
    }

    /// Address whose local part carries a random UUID fragment.
    pub fn email(&mut self) -> String {
        let first = self.pick(FIRST_NAMES).to_lowercase();
        let last = self.pick(LAST_NAMES).to_lowercase();
        let domain = self.pick(EMAIL_DOMAINS);
        let id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();
        let short_id = &id.simple().to_string()[..12];
        format!("{first}.{last}.{short_id}@{domain}")
    }

    /// Capitalized sentence of 4 to 8 words ending with a period.
    pub fn sentence(&mut self) -> String {
        let count = self.rng.gen_range(4..=8);
        let words: Vec<&str> = (0..count).map(|_| self.pick(LOREM)).collect();
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    /// Paragraph of 3 or 4 sentences.
    pub fn paragraph(&mut self) -> String {
        let count = self.rng.gen_range(3..=4);
        (0..count)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        // Every caller passes a non-empty constant slice.
        *items
            .choose(&mut self.rng)
            .unwrap_or(&items[0])
    }
}

/// Generates a valid user payload.
pub fn generate_user_fixture() -> UserFixture {
    Faker::new().user()
}

/// Generates a valid post payload (without `user_id`).
pub fn generate_post_fixture() -> PostFixture {
    Faker::new().post()
}

/// Generates a valid comment payload (without `post_id`).
pub fn generate_comment_fixture() -> CommentFixture {
    Faker::new().comment()
}

/// Generates a valid todo payload (without `user_id`).
pub fn generate_todo_fixture() -> TodoFixture {
    Faker::new().todo()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn looks_like_email(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !email.contains(char::is_whitespace)
    }

    #[test]
    fn user_fixture_fields_are_non_blank() {
        let mut faker = Faker::seeded(7);
        for _ in 0..200 {
            let user = faker.user();
            assert!(!user.name.trim().is_empty());
            assert!(looks_like_email(&user.email), "bad email: {}", user.email);
        }
    }

    #[test]
    fn user_fixture_serializes_wire_enums() {
        let user = UserFixture {
            name: "Kreetika Bhetuwal".to_string(),
            gender: Gender::Female,
            email: "kreetika@example.com".to_string(),
            status: UserStatus::Active,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["gender"], "female");
        assert_eq!(value["status"], "active");
    }

    #[test]
    fn user_fixture_covers_every_enum_value() {
        let mut faker = Faker::seeded(42);
        let users: Vec<UserFixture> = (0..100).map(|_| faker.user()).collect();

        for gender in Gender::ALL {
            assert!(users.iter().any(|u| u.gender == gender), "{gender:?} never drawn");
        }
        for status in UserStatus::ALL {
            assert!(users.iter().any(|u| u.status == status), "{status:?} never drawn");
        }
    }

    #[test]
    fn emails_do_not_repeat() {
        let mut faker = Faker::seeded(3);
        let emails: HashSet<String> = (0..500).map(|_| faker.email()).collect();
        assert_eq!(emails.len(), 500);
    }

    #[test]
    fn seeded_fakers_are_reproducible() {
        let a = Faker::seeded(11).user();
        let b = Faker::seeded(11).user();
        assert_eq!(a, b);
    }

    #[test]
    fn post_fixture_has_sentence_and_paragraph() {
        let mut faker = Faker::seeded(5);
        for _ in 0..100 {
            let post = faker.post();
            assert!(post.title.ends_with('.'));
            assert!(post.title.chars().next().unwrap().is_ascii_uppercase());
            assert!(post.body.matches('.').count() >= 3);
            assert!(post.body.len() < 500);
        }
    }

    #[test]
    fn new_post_flattens_fixture_fields() {
        let post = PostFixture {
            title: "Title.".to_string(),
            body: "Body.".to_string(),
        };

        let value = serde_json::to_value(post.for_user(12)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"user_id": 12, "title": "Title.", "body": "Body."})
        );
    }

    #[test]
    fn todo_fixture_uses_api_statuses() {
        let mut faker = Faker::seeded(9);
        for _ in 0..50 {
            let value = serde_json::to_value(faker.todo().for_user(1)).unwrap();
            let status = value["status"].as_str().unwrap();
            assert!(status == "pending" || status == "completed");
        }
    }

    #[test]
    fn free_generators_produce_valid_payloads() {
        let user = generate_user_fixture();
        assert!(looks_like_email(&user.email));
        assert!(!generate_post_fixture().title.is_empty());
        assert!(looks_like_email(&generate_comment_fixture().email));
        assert!(!generate_todo_fixture().title.is_empty());
    }
}
