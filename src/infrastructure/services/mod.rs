//! Infrastructure services

mod query_service;

pub use query_service::{
    QueryService, QueryServiceTrait, DEFAULT_OTHER_REPLY, IT_SUPPORT_REPLY, UNKNOWN_ROUTE_REPLY,
    WEBSEARCH_REPLY,
};
