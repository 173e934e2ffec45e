// Matching engine: trade classification, location extraction, ranking,
// and the request pipeline that ties them to the collaborators.

pub mod handlers;
pub mod location;
pub mod pipeline;
pub mod ranker;
pub mod trade_type;
