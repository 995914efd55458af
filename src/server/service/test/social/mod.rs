use entity::post::PostVisibility;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use crate::server::{
    error::AppError,
    model::comment::CreateCommentParams,
    service::{comment::CommentService, post::PostService},
};

mod comments;
mod posts;

fn comment_params(post_id: Uuid, user_id: Uuid, parent: Option<Uuid>) -> CreateCommentParams {
    CreateCommentParams {
        post_id,
        user_id,
        parent_comment_id: parent,
        content: "Nice work!".to_string(),
        media_urls: Vec::new(),
    }
}
