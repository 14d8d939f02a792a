use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::Storage;

/// The quote shown for one calendar day. Persisted so repeated invocations
/// on the same day show the same quote; a new day draws a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub date: NaiveDate,
    pub text: String,
}

pub fn quote_of_the_day(storage: &Storage, today: NaiveDate) -> String {
    if let Some(record) = storage.load_quote()
        && record.date == today
    {
        debug!("reusing stored quote of the day");
        return record.text;
    }

    let index = rand::thread_rng().gen_range(0..QUOTES.len());
    let text = QUOTES[index].to_string();

    let record = QuoteRecord {
        date: today,
        text: text.clone(),
    };
    if let Err(err) = storage.save_quote(&record) {
        warn!(error = %err, "failed persisting quote of the day");
    }

    text
}

pub const QUOTES: &[&str] = &[
    "“Discipline is the soul of an army. It makes small numbers formidable; procures success to the weak, and esteem to all.” – George Washington",
    "“We must all suffer one of two things: the pain of discipline or the pain of regret.” – Jim Rohn",
    "“Discipline is the bridge between goals and accomplishment.” – Jim Rohn",
    "“Discipline is doing what you really don’t want to do so you can do what you really want to do.” – Jeff Fisher",
    "“Without self-discipline, success is impossible, period.” – Lou Holtz",
    "“The first and best victory is to conquer self.” – Plato",
    "“It is not the mountain we conquer, but ourselves.” – Sir Edmund Hillary",
    "“Rule your mind or it will rule you.” – Horace",
    "“Your success is determined by what you do when no one is watching.” – John Wooden",
    "“Discipline is remembering what you want.” – David Campbell",
    "“By constant self-discipline and self-control, you can develop greatness of character.” – Grenville Kleiser",
    "“Through discipline comes freedom.” – Aristotle",
    "“I count him braver who overcomes his desires than him who conquers his enemies, for the hardest victory is over self.” – Aristotle",
    "“Your future is created by what you do today, not tomorrow.” – Robert Kiyosaki",
    "“Discipline is the refining fire by which talent becomes ability.” – Roy L. Smith",
    "“It takes discipline not to let social media steal your time.” – Alexis Ohanian",
    "“No man is free who cannot command himself.” – Pythagoras",
    "“You have power over your mind—not outside events. Realize this, and you will find strength.” – Marcus Aurelius",
    "“Self-control is strength. Right thought is mastery. Calmness is power.” – James Allen",
    "“To discipline your mind is to set yourself free.” – Marcus Aurelius",
    "“If you do not conquer self, you will be conquered by self.” – Napoleon Hill",
    "“With self-discipline, most anything is possible.” – Theodore Roosevelt",
    "“It is easier to discipline yourself now than to regret your lack of discipline later.” – Darren Hardy",
    "“A disciplined life is a choice, not a chance.” – Stephen R. Covey",
    "“We do today what they won’t, so tomorrow we can accomplish what they can’t.” – Jerry Rice",
    "“Discipline is the foundation upon which all success is built. Lack of discipline inevitably leads to failure.” – Jim Rohn",
    "“Success doesn’t just happen. It is built on discipline, consistency, and hard work.” – Darren Hardy",
    "“Self-discipline is the key to personal greatness.” – Brian Tracy",
    "“Your level of success is determined by your level of discipline and perseverance.” – David Goggins",
    "“You will never always be motivated, so you must learn to be disciplined.” – Tim Grover",
    "“Discipline is the key that unlocks the door to success.” – John Wooden",
    "“Dreams don’t work unless you do.” – John C. Maxwell",
    "“The difference between the successful and the unsuccessful is discipline.” – Ed Mylett",
    "“Self-discipline begins with the mastery of your thoughts. If you can’t control what you think, you can’t control what you do.” – Napoleon Hill",
    "“Success is nothing more than a few simple disciplines, practiced every day.” – Jim Rohn",
    "“In reading the lives of great men, I found that the first victory they won was over themselves.” – Harry S. Truman",
    "“Discipline is the bridge between goals and accomplishments.” – Harvey Mackay",
    "“If you want to be successful, discipline is non-negotiable.” – Jocko Willink",
    "“There is no magic to achievement. It’s really about hard work, choices, and persistence.” – Michelle Obama",
    "“A disciplined person is a successful person in disguise.” – Steve Pavlina",
    "“The price of discipline is always less than the pain of regret.” – Robin Sharma",
    "“Success isn’t about how much talent you have; it’s about how much discipline you apply.” – Inky Johnson",
    "“Hard work, dedication, and discipline separate the best from the rest.” – Kobe Bryant",
    "“Without self-discipline, success is impossible.” – Lou Holtz",
    "“It is our choices that show what we truly are, far more than our abilities.” – J.K. Rowling",
    "“Success isn’t owned. It’s leased, and rent is due every day.” – J.J. Watt",
    "“Discipline is doing what needs to be done, even when you don’t feel like doing it.” – Anonymous",
    "“Winners embrace discipline, while losers see it as punishment.” – Larry Winget",
    "“To achieve success, discipline your mind and your habits.” – Mark Divine",
    "“Success doesn’t come from what you do occasionally, but from what you do consistently.” – Marie Forleo",
];
