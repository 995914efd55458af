use entity::{
    group::GroupType,
    group_membership::{MembershipRole, MembershipStatus},
};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{error::AppError, service::group::GroupService};

mod join;
mod members;
