pub mod home;
pub mod records;
pub mod user;

pub use home::{HarmRiskNode, HomePageData, SubfactorNode};
pub use records::{Entity, Expert, HarmRisk, Litigation, Nonprofit, NonprofitLink, Subfactor};
pub use user::{CreateUserRequest, LoginRequest, Token, User};
