// Resume API: whole-document CRUD plus section, data point, bullet point and
// extra info edits on a stored resume.

pub mod handlers;
