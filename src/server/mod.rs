//! MCP server exposing the SoulBuddy pages as tools

mod tools;

pub use tools::{
    BlogInput, ChatInput, DailyHoroscopeInput, FieldUpdate, ListLocationsInput, NavigateInput,
    RecommendationsInput, SignProfileInput, SoulBuddyServer, ToolResult, UpdateBirthFormInput,
    VideosInput,
};
