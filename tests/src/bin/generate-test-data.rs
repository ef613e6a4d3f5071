//! Prints a storage file, in the format read by `JsonFileStorage`, holding
//! randomly generated comment threads

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use newsdesk_api::{ArticleId, Comment, CommentId, UserId};
use newsdesk_client::{Thread, DEFAULT_STORAGE_KEY};
use rand::{seq::SliceRandom, Rng};

const NUM_USERS: usize = 8;
const NUM_ARTICLES: usize = 12;

const NUM_COMMENTS: usize = 400;
const COMMENT_MIN_WORDS: usize = 3;
const COMMENT_MAX_WORDS: usize = 60;

// Probability for a new comment to reply to an existing one of the same article
const REPLY_PROBABILITY: f64 = 0.6;
const LIKE_PROBABILITY: f64 = 0.2;
const MAX_AGE_DAYS: i64 = 30;

fn gen_comment_text(rng: &mut impl Rng) -> String {
    lipsum::lipsum_words(rng.gen_range(COMMENT_MIN_WORDS..=COMMENT_MAX_WORDS))
}

fn main() {
    let mut rng = rand::thread_rng();
    let users = (1..=NUM_USERS)
        .map(|i| UserId(format!("user_{i}")))
        .collect::<Vec<_>>();
    let articles = (1..=NUM_ARTICLES)
        .map(|i| ArticleId(format!("article-{i}")))
        .collect::<Vec<_>>();

    // Generate comments, oldest first so that replies always come after their parent
    let now = Utc::now();
    let mut ages = (0..NUM_COMMENTS)
        .map(|_| Duration::seconds(rng.gen_range(0..MAX_AGE_DAYS * 24 * 3600)))
        .collect::<Vec<_>>();
    ages.sort_unstable_by_key(|a| std::cmp::Reverse(*a));

    let mut comments: Vec<Comment> = Vec::with_capacity(NUM_COMMENTS);
    for age in ages {
        let article = articles.choose(&mut rng).unwrap().clone();
        let parent_id = match rng.gen_bool(REPLY_PROBABILITY) {
            true => comments
                .iter()
                .filter(|c| c.article_id == article)
                .collect::<Vec<_>>()
                .choose(&mut rng)
                .map(|c| c.id.clone()),
            false => None,
        };
        let like_user_ids = users
            .iter()
            .filter(|_| rng.gen_bool(LIKE_PROBABILITY))
            .cloned()
            .collect();
        comments.push(Comment {
            id: CommentId::generate(),
            article_id: article,
            author_id: users.choose(&mut rng).unwrap().clone(),
            content: gen_comment_text(&mut rng),
            parent_id,
            timestamp: now - age,
            like_user_ids,
        });
    }

    for article in &articles {
        let thread = Thread::build(
            comments
                .iter()
                .filter(|c| c.article_id == *article)
                .cloned()
                .collect(),
        );
        eprintln!(
            "{article}: {} comments, {} threads",
            thread.len(),
            thread.roots().count()
        );
    }

    let mut file = BTreeMap::new();
    file.insert(
        DEFAULT_STORAGE_KEY,
        serde_json::to_string(&comments).expect("serializing comments"),
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&file).expect("serializing storage file")
    );
}
