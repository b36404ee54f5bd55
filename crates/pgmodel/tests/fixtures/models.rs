use pgmodel::{Model, Query};

#[derive(Debug, Clone, Default, PartialEq, Model)]
pub struct User {
    #[model = "id,BIGINT PRIMARY KEY"]
    pub id: i64,
    #[model = "name,TEXT NOT NULL"]
    pub name: String,
    #[model = "status,INT NOT NULL DEFAULT 0"]
    pub status: i32,
    #[model("tags,TEXT ARRAY")]
    pub tags: Vec<String>,
    pub cached: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Query)]
pub struct UserInfo {
    #[query = "id,get;getgroup;getgroupeq,status;getgroupset"]
    pub id: i64,
    #[query = "name,get"]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Query)]
pub struct UserTags {
    #[query = "status,getgroupset"]
    pub status: i32,
    #[query = "tags"]
    pub tags: Vec<String>,
}
