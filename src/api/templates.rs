//! Static HTML for the link-creation page

use crate::utils::escape_html;

const BASE_URL_PLACEHOLDER: &str = "%BASE_URL%";

const FORM_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>URL Redirect</title>
<style>
  body { background: #e6e6fa; font-family: sans-serif; }
  .block { padding-left: 1cm; margin-bottom: 0.5em; }
</style>
</head>
<body>
<h1 class="block">URL Redirect</h1>
<form id="shorten" class="block" data-endpoint="%BASE_URL%">
  <div><input id="destinationUrl" size="50" placeholder="Enter URL (http://www.example.com)"></div>
  <div><input id="customToken" size="50" placeholder="Use Custom Token (domain.com/redirect/custom_token)"></div>
  <div><button type="submit">Shorten URL</button></div>
</form>
<div class="block" id="result"></div>
<script>
document.getElementById("shorten").addEventListener("submit", function (event) {
  event.preventDefault();
  var form = event.target;
  var payload = { destination_url: document.getElementById("destinationUrl").value };
  var customToken = document.getElementById("customToken").value;
  if (customToken !== "") {
    payload.custom_token = customToken;
  }
  fetch(form.dataset.endpoint, {
    method: "POST",
    headers: { "Content-Type": "application/json", "Accept": "text/html" },
    body: JSON.stringify(payload)
  })
    .then(function (resp) { return resp.text(); })
    .then(function (text) { document.getElementById("result").innerHTML = text; })
    .catch(function (err) { alert("POST failed. " + err); });
});
</script>
</body>
</html>
"#;

/// Link-creation page posting to `base_url`.
pub fn render_form(base_url: &str) -> String {
    FORM_TEMPLATE.replace(BASE_URL_PLACEHOLDER, &escape_html(base_url))
}
