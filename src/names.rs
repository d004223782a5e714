// Qualified names the engine recognizes or emits.

/// Swagger 2 (`io.swagger.annotations`).
pub mod v2 {
    pub const API: &str = "io.swagger.annotations.Api";
    pub const AUTHORIZATION: &str = "io.swagger.annotations.Authorization";
    pub const API_OPERATION: &str = "io.swagger.annotations.ApiOperation";
    pub const API_PARAM: &str = "io.swagger.annotations.ApiParam";
    pub const API_RESPONSES: &str = "io.swagger.annotations.ApiResponses";
    pub const API_RESPONSE: &str = "io.swagger.annotations.ApiResponse";
    pub const API_MODEL: &str = "io.swagger.annotations.ApiModel";
    pub const API_MODEL_PROPERTY: &str = "io.swagger.annotations.ApiModelProperty";
}

/// OpenAPI 3 (`io.swagger.v3.oas.annotations`).
pub mod v3 {
    pub const TAG: &str = "io.swagger.v3.oas.annotations.tags.Tag";
    pub const OPERATION: &str = "io.swagger.v3.oas.annotations.Operation";
    pub const PARAMETER: &str = "io.swagger.v3.oas.annotations.Parameter";
    pub const PARAMETER_IN: &str = "io.swagger.v3.oas.annotations.enums.ParameterIn";
    pub const API_RESPONSES: &str = "io.swagger.v3.oas.annotations.responses.ApiResponses";
    pub const API_RESPONSE: &str = "io.swagger.v3.oas.annotations.responses.ApiResponse";
    pub const SCHEMA: &str = "io.swagger.v3.oas.annotations.media.Schema";
    pub const ARRAY_SCHEMA: &str = "io.swagger.v3.oas.annotations.media.ArraySchema";
}

/// Parameter binding annotations, grouped by the location they imply.
pub mod binding {
    pub const COOKIE: &[&str] = &[
        "org.springframework.web.bind.annotation.CookieValue",
        "javax.ws.rs.CookieParam",
        "jakarta.ws.rs.CookieParam",
    ];
    pub const HEADER: &[&str] = &[
        "org.springframework.web.bind.annotation.RequestHeader",
        "javax.ws.rs.HeaderParam",
        "jakarta.ws.rs.HeaderParam",
    ];
    pub const PATH: &[&str] = &[
        "org.springframework.web.bind.annotation.PathVariable",
        "javax.ws.rs.PathParam",
        "jakarta.ws.rs.PathParam",
    ];
    pub const QUERY: &[&str] = &[
        "org.springframework.web.bind.annotation.RequestParam",
        "javax.ws.rs.QueryParam",
        "jakarta.ws.rs.QueryParam",
    ];
}
