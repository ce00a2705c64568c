use crate::models::{MAX_SEVERITY, MIN_PASSWORD_LEN, MIN_SEVERITY};

pub fn render_index() -> String {
    INDEX_HTML
        .replace("{{MIN_PASSWORD}}", &MIN_PASSWORD_LEN.to_string())
        .replace("{{MIN_SEVERITY}}", &MIN_SEVERITY.to_string())
        .replace("{{MAX_SEVERITY}}", &MAX_SEVERITY.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sick Days</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #24302b;
      --card: #ffffff;
      --empty: #e4e0d6;
      --healthy: #8cc7a1;
      --sick-1: #f6d38c;
      --sick-2: #f2b06b;
      --sick-3: #ea8a52;
      --sick-4: #d9603f;
      --sick-5: #b23a2f;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px;
    }

    .app { max-width: 1040px; margin: 0 auto; }
    .card { background: var(--card); border-radius: 18px; padding: 20px; margin-bottom: 18px; }
    .hidden { display: none; }
    .row { display: flex; gap: 12px; align-items: center; flex-wrap: wrap; }
    .error { color: var(--sick-5); min-height: 1.2em; }

    .months { display: grid; grid-auto-flow: column; font-size: 11px; margin-left: 2px; }
    .heatmap { display: grid; grid-auto-flow: column; grid-template-rows: repeat(7, 13px); gap: 3px; }
    .cell { width: 13px; height: 13px; border-radius: 3px; background: transparent; }
    .cell.day { background: var(--empty); cursor: pointer; }
    .cell.healthy { background: var(--healthy); }
    .cell.sick-1 { background: var(--sick-1); }
    .cell.sick-2 { background: var(--sick-2); }
    .cell.sick-3 { background: var(--sick-3); }
    .cell.sick-4 { background: var(--sick-4); }
    .cell.sick-5 { background: var(--sick-5); }
    .cell.break { margin-left: 4px; }

    button { border: 0; border-radius: 10px; padding: 8px 14px; cursor: pointer; background: var(--ink); color: #fff; }
    button.secondary { background: var(--empty); color: var(--ink); }
  </style>
</head>
<body>
  <main class="app">
    <section id="auth" class="card hidden">
      <h1>Sick Days</h1>
      <form id="login-form" class="row">
        <input name="email" type="email" placeholder="Email" required />
        <input name="password" type="password" placeholder="Password" required />
        <button type="submit">Log in</button>
      </form>
      <form id="signup-form" class="row">
        <input name="name" placeholder="Name" required />
        <input name="email" type="email" placeholder="Email" required />
        <input name="password" type="password" placeholder="Password" minlength="{{MIN_PASSWORD}}" required />
        <button type="submit">Sign up</button>
      </form>
    </section>

    <section id="tracker" class="hidden">
      <div class="card row">
        <strong id="user-name"></strong>
        <select id="year-select"></select>
        <button id="logout" class="secondary">Log out</button>
      </div>
      <div class="card">
        <div id="months" class="months"></div>
        <div id="heatmap" class="heatmap"></div>
      </div>
      <div id="editor" class="card hidden">
        <h2 id="editor-date"></h2>
        <form id="entry-form" class="row">
          <label><input id="is-sick" type="checkbox" /> Sick</label>
          <label>Severity
            <input id="severity" type="number" min="{{MIN_SEVERITY}}" max="{{MAX_SEVERITY}}" value="1" required />
          </label>
          <button type="submit">Save</button>
          <button id="close-editor" type="button" class="secondary">Close</button>
        </form>
        <div id="confirm" class="hidden">
          <p id="confirm-text"></p>
          <button id="confirm-yes" type="button">Replace</button>
          <button id="confirm-no" type="button" class="secondary">Back</button>
        </div>
      </div>
    </section>

    <p id="status" class="error"></p>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);
    let busy = false;

    const describe = (entry) => {
      if (!entry) return 'no entry';
      return entry.isSick ? `sick (severity ${entry.severity})` : 'healthy';
    };

    const cellClass = (slot) => {
      if (!slot) return 'cell';
      const entry = slot.entry;
      if (!entry) return 'cell day';
      return entry.isSick ? `cell day sick-${entry.severity}` : 'cell day healthy';
    };

    const call = async (method, path, body) => {
      const res = await fetch(path, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const renderGrid = (grid) => {
      const months = $('months');
      months.innerHTML = '';
      months.style.gridTemplateColumns = `repeat(${grid.weeks.length}, 16px)`;
      grid.months.forEach((month) => {
        const label = document.createElement('span');
        label.textContent = month.label;
        label.style.gridColumn = `${month.startWeek + 1} / span ${month.spanWeeks}`;
        months.appendChild(label);
      });

      const heatmap = $('heatmap');
      heatmap.innerHTML = '';
      grid.weeks.forEach((week) => {
        week.days.forEach((slot) => {
          const cell = document.createElement('div');
          cell.className = cellClass(slot) + (week.monthBreak ? ' break' : '');
          if (slot) {
            cell.title = `${slot.dateKey}: ${describe(slot.entry)}`;
            cell.addEventListener('click', () => run(call('POST', '/api/day', { date: slot.dateKey })));
          }
          heatmap.appendChild(cell);
        });
      });
    };

    const renderEdit = (edit) => {
      const open = edit.state !== 'idle';
      $('editor').classList.toggle('hidden', !open);
      if (!open) return;
      const form = edit.form;
      $('editor-date').textContent = form.dateKey;
      $('is-sick').checked = form.isSick;
      $('severity').value = form.severity;
      $('severity').disabled = !form.isSick;
      const confirming = edit.state === 'confirming';
      $('confirm').classList.toggle('hidden', !confirming);
      $('entry-form').classList.toggle('hidden', confirming);
      if (confirming) {
        $('confirm-text').textContent =
          `Replace ${describe(edit.plan.existing)} with ${describe(edit.plan.payload)}?`;
      }
    };

    const render = (view) => {
      busy = view.busy;
      $('auth').classList.toggle('hidden', view.authenticated);
      $('tracker').classList.toggle('hidden', !view.authenticated);
      $('status').textContent = view.error || '';
      if (!view.authenticated) return;

      $('user-name').textContent = (view.user && (view.user.name || view.user.email)) || '';
      const select = $('year-select');
      select.innerHTML = '';
      view.years.slice().reverse().forEach((year) => {
        const option = document.createElement('option');
        option.value = year;
        option.textContent = year;
        option.selected = year === view.selectedYear;
        select.appendChild(option);
      });
      renderGrid(view.grid);
      renderEdit(view.edit);
    };

    const run = (promise) => promise.then(render).catch((err) => { $('status').textContent = err.message; });

    const formBody = (form) => Object.fromEntries(new FormData(form).entries());

    $('login-form').addEventListener('submit', (event) => {
      event.preventDefault();
      run(call('POST', '/api/login', formBody(event.target)));
    });

    $('signup-form').addEventListener('submit', (event) => {
      event.preventDefault();
      run(call('POST', '/api/signup', formBody(event.target)));
    });

    $('logout').addEventListener('click', () => run(call('POST', '/api/logout')));
    $('year-select').addEventListener('change', (event) =>
      run(call('POST', '/api/year', { year: Number(event.target.value) })));
    $('is-sick').addEventListener('change', (event) => { $('severity').disabled = !event.target.checked; });

    $('entry-form').addEventListener('submit', (event) => {
      event.preventDefault();
      if (busy) return;
      run(call('POST', '/api/entry', {
        isSick: $('is-sick').checked,
        severity: Number($('severity').value)
      }));
    });

    $('close-editor').addEventListener('click', () => run(call('POST', '/api/entry/cancel')));
    $('confirm-yes').addEventListener('click', () => run(call('POST', '/api/entry/confirm')));
    $('confirm-no').addEventListener('click', () => run(call('POST', '/api/entry/cancel')));

    run(call('GET', '/api/view'));
  </script>
</body>
</html>
"#;
