use crate::constants;

/// A named aggregate query run against the loaded delivery tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedQuery {
    /// Also the file stem of the result CSV
    pub name: &'static str,
    pub sql: &'static str,
}

/// Fixed catalog of aggregate queries, in run order.
///
/// Queries are written against the `t20_matches`, `odi_matches` and
/// `test_matches` tables.
pub const QUERY_CATALOG: &[NamedQuery] = &[
    NamedQuery {
        name: "Top_10_Run_Scorers_All_Formats",
        sql: r#"
        SELECT batter, SUM(runs_batter) AS total_runs
        FROM (
            SELECT batter, runs_batter FROM t20_matches
            UNION ALL
            SELECT batter, runs_batter FROM odi_matches
            UNION ALL
            SELECT batter, runs_batter FROM test_matches
        )
        GROUP BY batter
        ORDER BY total_runs DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Top_10_Six_Hitters_IPL",
        sql: r#"
        SELECT batter, COUNT(*) AS sixes
        FROM t20_matches
        WHERE runs_batter = 6
        GROUP BY batter
        ORDER BY sixes DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Best_Strike_Rate_IPL",
        sql: r#"
        SELECT batter,
               ROUND(SUM(runs_batter) * 100.0 / COUNT(*), 2) AS strike_rate,
               COUNT(*) AS balls_faced
        FROM t20_matches
        GROUP BY batter
        HAVING COUNT(*) >= 200
        ORDER BY strike_rate DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Batsmen_With_Most_Centuries_ODI",
        sql: r#"
        SELECT batter, COUNT(DISTINCT date) AS centuries
        FROM (
            SELECT batter, date,
                   SUM(runs_batter) AS runs_in_match
            FROM odi_matches
            GROUP BY batter, date
            HAVING SUM(runs_batter) >= 100
        )
        GROUP BY batter
        ORDER BY centuries DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Top_Test_Partnerships",
        sql: r#"
        SELECT team1 AS batting_team, SUM(runs_batter) AS partnership_runs
        FROM test_matches
        GROUP BY team1
        ORDER BY partnership_runs DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Top_10_Wicket_Takers_IPL",
        sql: r#"
        SELECT bowler, COUNT(wicket_kind) AS wickets
        FROM t20_matches
        WHERE wicket_kind IS NOT NULL
        GROUP BY bowler
        ORDER BY wickets DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Best_Economy_ODI",
        sql: r#"
        SELECT bowler,
               ROUND(SUM(runs_total) * 6.0 / COUNT(*), 2) AS economy_rate,
               COUNT(*) AS balls_bowled
        FROM odi_matches
        GROUP BY bowler
        HAVING COUNT(*) >= 500
        ORDER BY economy_rate ASC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Most_Maidens_Test",
        sql: r#"
        SELECT bowler, COUNT(*) AS maiden_overs
        FROM (
            SELECT bowler, over, SUM(runs_total) AS runs_in_over
            FROM test_matches
            GROUP BY bowler, over
            HAVING SUM(runs_total) = 0
        )
        GROUP BY bowler
        ORDER BY maiden_overs DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Five_Wicket_Hauls_Test",
        sql: r#"
        SELECT bowler, COUNT(DISTINCT date) AS five_wicket_hauls
        FROM (
            SELECT bowler, date,
                   COUNT(*) AS wickets_in_match
            FROM test_matches
            WHERE wicket_kind IS NOT NULL
            GROUP BY bowler, date
            HAVING COUNT(*) >= 5
        )
        GROUP BY bowler
        ORDER BY five_wicket_hauls DESC;
        "#,
    },
    NamedQuery {
        name: "Most_Dot_Balls_IPL",
        sql: r#"
        SELECT bowler, COUNT(*) AS dot_balls
        FROM t20_matches
        WHERE runs_total = 0
        GROUP BY bowler
        ORDER BY dot_balls DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "T20I_Teams_Highest_Win_Percentage",
        sql: r#"
        SELECT winner,
               ROUND(100.0 * COUNT(*) / (SELECT COUNT(*) FROM t20_matches), 2) AS win_percentage
        FROM t20_matches
        WHERE winner IS NOT NULL
        GROUP BY winner
        ORDER BY win_percentage DESC;
        "#,
    },
    NamedQuery {
        name: "ODI_Teams_Highest_Avg_Runs",
        sql: r#"
        SELECT team1 AS team, ROUND(AVG(runs_total), 2) AS avg_runs
        FROM odi_matches
        GROUP BY team1
        ORDER BY avg_runs DESC;
        "#,
    },
    NamedQuery {
        name: "Test_Teams_Most_Innings_Wins",
        sql: r#"
        SELECT winner, COUNT(*) AS innings_wins
        FROM test_matches
        WHERE winner IS NOT NULL
          AND wicket_kind IS NOT NULL
        GROUP BY winner
        ORDER BY innings_wins DESC;
        "#,
    },
    NamedQuery {
        name: "Most_Matches_All_Formats",
        sql: r#"
        SELECT team, COUNT(*) AS total_matches
        FROM (
            SELECT team1 AS team FROM t20_matches
            UNION ALL
            SELECT team2 FROM t20_matches
            UNION ALL
            SELECT team1 FROM odi_matches
            UNION ALL
            SELECT team2 FROM odi_matches
            UNION ALL
            SELECT team1 FROM test_matches
            UNION ALL
            SELECT team2 FROM test_matches
        )
        GROUP BY team
        ORDER BY total_matches DESC;
        "#,
    },
    NamedQuery {
        name: "Avg_Runs_Per_Over_IPL_By_Year",
        sql: r#"
        SELECT SUBSTR(date, 1, 4) AS year,
               ROUND(AVG(runs_total), 2) AS avg_runs_per_over
        FROM t20_matches
        GROUP BY year
        ORDER BY year;
        "#,
    },
    NamedQuery {
        name: "Highest_Scoring_Test_Matches",
        sql: r#"
        SELECT date, venue, team1, team2, SUM(runs_total) AS total_runs
        FROM test_matches
        GROUP BY date, venue, team1, team2
        ORDER BY total_runs DESC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Lowest_Team_Totals_IPL",
        sql: r#"
        SELECT date, batting_team, SUM(runs_total) AS team_total
        FROM t20_matches
        GROUP BY date, batting_team
        ORDER BY team_total ASC
        LIMIT 10;
        "#,
    },
    NamedQuery {
        name: "Century_And_FiveWickets_Same_Match",
        sql: r#"
        SELECT batter
        FROM (
            SELECT batter, date, SUM(runs_batter) AS runs_in_match
            FROM (
                SELECT batter, date, runs_batter FROM t20_matches
                UNION ALL
                SELECT batter, date, runs_batter FROM odi_matches
                UNION ALL
                SELECT batter, date, runs_batter FROM test_matches
            )
            GROUP BY batter, date
            HAVING runs_in_match >= 100
        ) AS centuries
        INTERSECT
        SELECT bowler
        FROM (
            SELECT bowler, date, COUNT(*) AS wickets_in_match
            FROM (
                SELECT bowler, date, wicket_kind FROM t20_matches
                UNION ALL
                SELECT bowler, date, wicket_kind FROM odi_matches
                UNION ALL
                SELECT bowler, date, wicket_kind FROM test_matches
            )
            WHERE wicket_kind IS NOT NULL
            GROUP BY bowler, date
            HAVING wickets_in_match >= 5
        );
        "#,
    },
    NamedQuery {
        name: "Fifty_Plus_In_All_Formats",
        sql: r#"
        SELECT batter
        FROM (
            SELECT batter FROM t20_matches
            GROUP BY batter, date
            HAVING SUM(runs_batter) >= 50
        )
        INTERSECT
        SELECT batter
        FROM (
            SELECT batter FROM odi_matches
            GROUP BY batter, date
            HAVING SUM(runs_batter) >= 50
        )
        INTERSECT
        SELECT batter
        FROM (
            SELECT batter FROM test_matches
            GROUP BY batter, date
            HAVING SUM(runs_batter) >= 50
        );
        "#,
    },
];

/// Look up catalog entries by name (case-insensitive). `None` selects all.
/// Blank names are ignored; unknown names are returned in the error list.
pub fn select_queries(names: Option<&[String]>) -> (Vec<&'static NamedQuery>, Vec<String>) {
    let Some(names) = names else {
        return (QUERY_CATALOG.iter().collect(), Vec::new());
    };

    let mut selected = Vec::new();
    let mut unknown = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        match QUERY_CATALOG.iter().find(|q| q.name.eq_ignore_ascii_case(name)) {
            Some(q) => selected.push(q),
            None => unknown.push(name.to_string()),
        }
    }
    (selected, unknown)
}

/// Tables referenced by the catalog, in category order
pub fn referenced_tables() -> Vec<&'static str> {
    [
        constants::IPL_TABLE,
        constants::ODI_TABLE,
        constants::T20_TABLE,
        constants::TEST_TABLE,
    ]
    .into_iter()
    .filter(|table| QUERY_CATALOG.iter().any(|q| q.sql.contains(*table)))
    .collect()
}
