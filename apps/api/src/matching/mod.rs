// Resume analysis and skill matching.
// Flow: resume text -> skill extraction -> match scoring -> course recommendation.

pub mod handlers;
pub mod recommend;
pub mod resume_text;
pub mod scorer;
pub mod skills;
