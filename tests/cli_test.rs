//! CLI Command Tests
//!
//! Argument parsing, JSON envelope shape, and exit codes of the
//! subcommands against a mocked OMDb backend.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use moviefinder::cli::{Cli, Command, ExitCode as CliExitCode, TypeFilter};
    use moviefinder::models::{MediaType, Route};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_command_basic() {
        let cli = Cli::parse_from(["moviefinder", "search", "pokemon"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "pokemon");
                assert_eq!(cmd.page, 1); // default
                assert!(cmd.media_type.is_none());
                assert!(cmd.year.is_none());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_with_filters() {
        let cli = Cli::parse_from([
            "moviefinder",
            "search",
            "star wars",
            "-t",
            "series",
            "--year",
            "1977",
            "--page",
            "3",
        ]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "star wars");
                assert_eq!(cmd.media_type, Some(TypeFilter::Series));
                assert_eq!(MediaType::from(cmd.media_type), MediaType::Series);
                assert_eq!(cmd.year, Some(1977));
                assert_eq!(cmd.page, 3);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_rejects_page_zero() {
        assert!(Cli::try_parse_from(["moviefinder", "search", "x", "--page", "0"]).is_err());
    }

    #[test]
    fn test_search_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["moviefinder", "search", "x", "-t", "game"]).is_err());
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["moviefinder", "info", "tt0096895"]);
        match cli.command {
            Some(Command::Info(cmd)) => assert_eq!(cmd.id, "tt0096895"),
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "moviefinder",
            "info",
            "tt0096895",
            "--json",
            "--quiet",
            "--config",
            "/tmp/moviefinder.toml",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/tmp/moviefinder.toml"))
        );
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::parse_from(["moviefinder", "s", "pokemon"]);
        assert!(matches!(cli.command, Some(Command::Search(_))));

        let cli = Cli::parse_from(["moviefinder", "i", "tt0096895"]);
        assert!(matches!(cli.command, Some(Command::Info(_))));
    }

    #[test]
    fn test_route_flag_decodes_id() {
        let cli = Cli::parse_from(["moviefinder", "-r", "/movie/tt%2000"]);
        assert_eq!(cli.route, Some(Route::Detail("tt 00".into())));

        let cli = Cli::parse_from(["moviefinder", "--route", "/"]);
        assert_eq!(cli.route, Some(Route::Search));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(CliExitCode::Success), 0);
        assert_eq!(i32::from(CliExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(CliExitCode::NetworkError), 3);
        assert_eq!(i32::from(CliExitCode::ApiError), 4);
    }
}

// =============================================================================
// JSON Output Tests
// =============================================================================

mod json_output {
    use moviefinder::cli::{ExitCode, JsonOutput};
    use moviefinder::models::MovieSummary;

    #[test]
    fn test_json_output_success() {
        let rows = vec![MovieSummary {
            title: "Batman".into(),
            year: "1989".into(),
            imdb_id: "tt0096895".into(),
            poster: "N/A".into(),
        }];
        let json = serde_json::to_value(JsonOutput::success(&rows)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][0]["imdbID"], "tt0096895");
        assert_eq!(json["data"][0]["Title"], "Batman");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_json_output_error() {
        let json =
            serde_json::to_value(JsonOutput::error_msg("Movie not found!", ExitCode::ApiError))
                .unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["message"], "Movie not found!");
        assert_eq!(json["error"]["code"], 4);
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod command_handlers {
    use mockito::{Matcher, Server};
    use moviefinder::api::OmdbClient;
    use moviefinder::cli::{ExitCode, InfoCmd, Output, SearchCmd, TypeFilter};
    use moviefinder::commands::{info_cmd, search_cmd};

    fn quiet_json() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn search(query: &str) -> SearchCmd {
        SearchCmd {
            query: query.into(),
            media_type: Some(TypeFilter::Movie),
            year: None,
            page: 1,
        }
    }

    #[tokio::test]
    async fn test_search_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("s".into(), "batman".into()),
                Matcher::UrlEncoded("type".into(), "movie".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"Search":[{"Title":"Batman","Year":"1989","imdbID":"tt0096895","Poster":"N/A"}],"Response":"True"}"#,
            )
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test_key", server.url());
        let code = search_cmd(search("batman"), &client, &quiet_json()).await;

        mock.assert_async().await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_search_zero_year_is_omitted() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::Exact(
                "apikey=test_key&s=batman&type=movie&page=1".into(),
            ))
            .with_status(200)
            .with_body(r#"{"Search":[],"Response":"True"}"#)
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test_key", server.url());
        let mut cmd = search("batman");
        cmd.year = Some(0);
        let code = search_cmd(cmd, &client, &quiet_json()).await;

        mock.assert_async().await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_search_not_found_is_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test_key", server.url());
        let code = search_cmd(search("zzzz"), &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::ApiError);
    }

    #[test]
    fn test_blank_query_is_invalid_args() {
        // Rejected before any request is made
        let client = OmdbClient::with_base_url("test_key", "http://127.0.0.1:9/");
        let code = tokio_test::block_on(search_cmd(search("   "), &client, &quiet_json()));
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_info_server_error_is_network_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test_key", server.url());
        let cmd = InfoCmd {
            id: "tt0096895".into(),
        };
        let code = info_cmd(cmd, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_info_unknown_id_is_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("i".into(), "tt0".into()))
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test_key", server.url());
        let cmd = InfoCmd { id: "tt0".into() };
        let code = info_cmd(cmd, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::ApiError);
    }

    #[test]
    fn test_blank_id_is_invalid_args() {
        let client = OmdbClient::with_base_url("test_key", "http://127.0.0.1:9/");
        let cmd = InfoCmd { id: " ".into() };
        let code = tokio_test::block_on(info_cmd(cmd, &client, &quiet_json()));
        assert_eq!(code, ExitCode::InvalidArgs);
    }
}
