//! HTML templates for the dashboard and diagnostic pages.

use crate::models::StatusSnapshot;

/// Combined status dashboard. The page refreshes itself every 30 seconds on
/// the client side; the proxy never pushes anything.
pub fn render_dashboard(bot_a: &StatusSnapshot, bot_b: &StatusSnapshot) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Discord Bots Status Page</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }}
        h1 {{ color: #5865F2; }}
        .bot {{ margin-bottom: 20px; padding: 15px; border-radius: 5px; border: 1px solid #ddd; }}
        .online {{ color: green; }}
        .offline, .error {{ color: red; }}
        .waiting {{ color: orange; }}
        .unknown {{ color: gray; }}
        .refresh {{ margin-top: 30px; padding: 10px; background: #5865F2; color: white;
                  border: none; border-radius: 5px; cursor: pointer; }}
    </style>
    <meta http-equiv="refresh" content="30">
</head>
<body>
    <h1>Discord Bots Status Dashboard</h1>

    <div class="bot">
        <h2>{bot_a_name}</h2>
        <p>Status: <span class="{bot_a_state}">{bot_a_state_upper}</span></p>
    </div>

    <div class="bot">
        <h2>{bot_b_name}</h2>
        <p>Status: <span class="{bot_b_state}">{bot_b_state_upper}</span></p>
    </div>

    <button class="refresh" onclick="location.reload()">Refresh Status</button>
    <p><small>Page auto-refreshes every 30 seconds</small></p>
</body>
</html>
"#,
        bot_a_name = bot_a.bot_name,
        bot_a_state = bot_a.status,
        bot_a_state_upper = bot_a.status.to_uppercase(),
        bot_b_name = bot_b.bot_name,
        bot_b_state = bot_b.status,
        bot_b_state_upper = bot_b.status.to_uppercase(),
    )
}

/// Result page of the `/ping-test` diagnostic; redirects to the connection
/// status page after a short delay.
pub fn render_ping_test(status_code: u16, body: &str) -> String {
    format!(
        r#"<html>
<head>
    <title>Ping Test</title>
    <meta http-equiv="refresh" content="5;url=/discord-status">
</head>
<body>
    <h1>Ping Test Result</h1>
    <p>Status code: {status_code}</p>
    <p>Response: {body}</p>
    <p><strong>Redirecting to Discord status page in 5 seconds to check if bots are online...</strong></p>
    <p><a href="/discord-status">Check Discord Status</a></p>
</body>
</html>
"#
    )
}

/// Colored pass/fail summary of both bots' Discord connection state.
pub fn render_discord_status(bot_a: &StatusSnapshot, bot_b: &StatusSnapshot) -> String {
    format!(
        r#"<html>
<head>
    <title>Discord Connection Status</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        .status {{ padding: 10px; margin: 10px 0; border-radius: 5px; }}
        .online {{ background-color: #d4edda; color: #155724; }}
        .offline {{ background-color: #f8d7da; color: #721c24; }}
        .waiting {{ background-color: #fff3cd; color: #856404; }}
    </style>
</head>
<body>
    <h1>Discord Connection Status</h1>
    <div class="status {bot_a_state}">
        <h2>Bot A Status: {bot_a_state}</h2>
        <p>Bot name: {bot_a_name}</p>
    </div>
    <div class="status {bot_b_state}">
        <h2>Bot B Status: {bot_b_state}</h2>
        <p>Bot name: {bot_b_name}</p>
    </div>
</body>
</html>
"#,
        bot_a_state = bot_a.status,
        bot_a_name = bot_a.bot_name,
        bot_b_state = bot_b.status,
        bot_b_name = bot_b.bot_name,
    )
}
