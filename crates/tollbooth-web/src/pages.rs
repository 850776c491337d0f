//! HTML pages for the issuance and demo flows.
//!
//! Simple format! templates styled with the Tailwind CDN, same approach as
//! an embedded dashboard: no asset pipeline, two self-contained pages.

/// Values displayed in the page badges.
pub struct PageContext {
    pub alg: String,
    pub kid: String,
    pub issuer: String,
    pub audience: String,
}

fn badges(ctx: &PageContext) -> String {
    format!(
        r#"<div class="flex flex-wrap gap-2 mt-3">
            <span class="px-3 py-1 rounded-full bg-gray-100 dark:bg-gray-800 text-sm text-gray-500">alg={alg}</span>
            <span class="px-3 py-1 rounded-full bg-gray-100 dark:bg-gray-800 text-sm text-gray-500">kid={kid}</span>
            <span class="px-3 py-1 rounded-full bg-gray-100 dark:bg-gray-800 text-sm text-gray-500">iss={iss}</span>
            <span class="px-3 py-1 rounded-full bg-gray-100 dark:bg-gray-800 text-sm text-gray-500">aud={aud}</span>
        </div>"#,
        alg = html_escape(&ctx.alg),
        kid = html_escape(&ctx.kid),
        iss = html_escape(&ctx.issuer),
        aud = html_escape(&ctx.audience),
    )
}

/// The issuance page: a UID form that mints a 30-second token.
pub fn index_page(ctx: &PageContext) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>JWT Issuer</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50 dark:bg-gray-900 min-h-screen text-gray-900 dark:text-gray-100">
    <div class="max-w-3xl mx-auto p-6 lg:p-10">
        <div class="bg-white dark:bg-gray-800 rounded-2xl shadow p-6">
            <h1 class="text-2xl font-bold">&#128272; Issue a 30-second JWT</h1>
            <p class="text-gray-500 mt-1">Enter a UID and a short-lived token is minted into an <b>HttpOnly</b> cookie.</p>
            {badges}
        </div>

        <div class="bg-white dark:bg-gray-800 rounded-2xl shadow p-6 mt-4">
            <form method="POST" action="/issue" class="flex flex-wrap gap-3 items-center">
                <input name="uid" placeholder="user-123" required autocomplete="off"
                    class="flex-1 min-w-[200px] px-4 py-3 rounded-lg border border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-700 focus:ring-2 focus:ring-indigo-500 outline-none">
                <button type="submit"
                    class="px-5 py-3 rounded-lg bg-indigo-600 hover:bg-indigo-700 text-white font-semibold">Issue</button>
            </form>
            <div class="mt-4 text-sm">
                JWKS: <a class="text-indigo-500 hover:underline" href="/.well-known/jwks.json">/.well-known/jwks.json</a>
                <p class="text-gray-500 mt-2 text-xs">After issuing, you are redirected to the demo page to call the protected API.</p>
            </div>
        </div>
    </div>
</body>
</html>"##,
        badges = badges(ctx),
    )
}

/// The demo page: countdown plus a button calling the protected API.
///
/// `exp` is injected from the non-sensitive display cookie; the token
/// itself never reaches page script.
pub fn demo_page(ctx: &PageContext, exp: i64) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>JWT API Simulation</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50 dark:bg-gray-900 min-h-screen text-gray-900 dark:text-gray-100">
    <div class="max-w-3xl mx-auto p-6 lg:p-10">
        <div class="bg-white dark:bg-gray-800 rounded-2xl shadow p-6">
            <div class="flex flex-wrap items-center justify-between gap-3">
                <h1 class="text-2xl font-bold">&#128272; JWT API Simulation</h1>
                <div class="text-gray-500 font-semibold">&#9203; Countdown <span id="cd" class="px-2 py-1 rounded bg-gray-100 dark:bg-gray-700 text-sm">--</span>s</div>
            </div>
            {badges}
        </div>

        <div class="bg-white dark:bg-gray-800 rounded-2xl shadow p-6 mt-4">
            <p class="text-sm text-gray-500 mb-4">This page never stores the JWT in URL, LocalStorage, SessionStorage, or JS variables. The JWT lives only in an <b>HttpOnly</b> cookie.</p>
            <div class="flex flex-wrap gap-3 items-center">
                <button id="btn" class="px-5 py-3 rounded-lg bg-indigo-600 hover:bg-indigo-700 text-white font-semibold">Call Protected API (/api/ping)</button>
                <button id="reset" onclick="location.href='/reset'" style="display:none"
                    class="px-5 py-3 rounded-lg border border-gray-300 dark:border-gray-600 font-semibold">Reset</button>
                <span class="text-xs text-gray-500">Re-issue the token if it expires.</span>
            </div>

            <div id="expired" class="hidden mt-4 p-3 rounded-lg bg-red-50 dark:bg-red-900/20 text-red-600">&#10060; JWT invalid or missing (401). Click <b>Reset</b> to re-issue.</div>
            <div id="waf403" class="hidden mt-4 p-3 rounded-lg bg-red-50 dark:bg-red-900/20 text-red-600">&#128737; Blocked by WAF (403). Likely missing/invalid JWT at the edge.</div>
            <div id="rate429" class="hidden mt-4 p-3 rounded-lg bg-red-50 dark:bg-red-900/20 text-red-600">&#128678; Rate limited by WAF (429). Please slow down and try again later.</div>
            <div id="genericErr" class="hidden mt-4 p-3 rounded-lg bg-red-50 dark:bg-red-900/20 text-red-600">&#9888; Network error. If a WAF sits in front, ensure a valid JWT cookie and try again.</div>
            <div id="ok" class="hidden mt-4 p-3 rounded-lg bg-green-50 dark:bg-green-900/20 text-green-600">&#9989; Request succeeded.</div>

            <h3 class="mt-5 font-semibold">Server Validation Result</h3>
            <pre id="out" class="mt-2 p-4 rounded-xl bg-gray-900 text-blue-100 text-sm whitespace-pre-wrap">Not called yet</pre>
        </div>
    </div>

<script>
const exp = Number({exp});
const out = document.getElementById("out");
const cd = document.getElementById("cd");
const boxes = ["expired", "waf403", "rate429", "genericErr", "ok"].map(id => document.getElementById(id));
const [expiredBox, waf403Box, rate429Box, genericErr, okBox] = boxes;
const resetBtn = document.getElementById("reset");
const btn = document.getElementById("btn");

function show(el) {{ el.classList.remove("hidden"); resetBtn.style.display = "inline-block"; }}
function hideAll() {{ boxes.forEach(e => e.classList.add("hidden")); }}

async function callApi() {{
    hideAll();
    btn.disabled = true;
    out.textContent = "Calling…";
    try {{
        const res = await fetch("/api/ping", {{ method: "GET", credentials: "same-origin" }});
        const txt = await res.text();
        if (res.status === 429) {{ show(rate429Box); out.textContent = txt; return; }}
        if (res.status === 403) {{ show(waf403Box); out.textContent = txt; return; }}
        if (res.status === 401) {{ show(expiredBox); out.textContent = txt; return; }}
        try {{ out.textContent = JSON.stringify(JSON.parse(txt), null, 2); }}
        catch {{ out.textContent = txt; }}
        if (res.ok) show(okBox);
    }} catch (e) {{
        show(genericErr);
        out.textContent = String(e);
    }} finally {{
        btn.disabled = false;
    }}
}}
btn.onclick = callApi;

function tick() {{
    if (!exp) {{ cd.textContent = "--"; return; }}
    const now = Math.floor(Date.now() / 1000);
    cd.textContent = Math.max(0, exp - now);
}}
tick(); setInterval(tick, 1000);
</script>
</body>
</html>"##,
        badges = badges(ctx),
        exp = exp,
    )
}

/// Simple HTML escape function.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
