use crate::models::{CLUB_NAME, PlayerName};

pub fn render_index() -> String {
    let members: Vec<serde_json::Value> = PlayerName::MEMBERS
        .iter()
        .map(|player| {
            serde_json::json!({
                "name": player.as_str(),
                "code": player.member_code(),
            })
        })
        .collect();

    INDEX_HTML
        .replace("{{CLUB_NAME}}", CLUB_NAME)
        .replace("{{MEMBERS}}", &serde_json::Value::from(members).to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{CLUB_NAME}} Leaderboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f6ef;
      --bg-2: #cfe3c4;
      --ink: #1e293b;
      --accent: #d4af37;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
      --gregory: #4f46e5;
      --birchan: #22c55e;
      --peter: #ec4899;
      --seven: #0ea5e9;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e7f0df 60%, #f6f8f2 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    .card {
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 18px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f5c57;
      font-size: 0.95rem;
    }

    .section-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    button, select {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-primary {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .btn-ghost {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .btn-icon {
      padding: 6px 12px;
      font-size: 0.8rem;
      background: rgba(47, 72, 88, 0.06);
      color: #6b645d;
    }

    select {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .ranking {
      display: grid;
      gap: 10px;
    }

    .rank-row {
      display: grid;
      grid-template-columns: 48px 1fr repeat(3, minmax(70px, auto));
      align-items: center;
      gap: 12px;
      background: white;
      border-radius: 18px;
      padding: 14px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .rank-row.rank-1 {
      border-color: var(--accent);
      background: linear-gradient(90deg, #fffdf5, white);
    }

    .rank-badge {
      display: grid;
      place-items: center;
      width: 42px;
      height: 42px;
      border-radius: 12px;
      font-weight: 600;
      font-size: 1.2rem;
      background: #f1f5f9;
      color: #94a3b8;
    }

    .rank-1 .rank-badge { background: var(--accent); color: white; }
    .rank-2 .rank-badge { background: #94a3b8; color: white; }
    .rank-3 .rank-badge { background: rgba(217, 119, 6, 0.8); color: white; }

    .player-name {
      font-weight: 600;
    }

    .player-code {
      font-size: 0.75rem;
      color: #8b857d;
      letter-spacing: 0.1em;
    }

    .metric .label {
      display: block;
      font-size: 0.7rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .metric .value {
      font-size: 1.2rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .history {
      display: grid;
      gap: 12px;
    }

    .round {
      background: white;
      border-radius: 18px;
      padding: 14px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .round-head {
      display: flex;
      justify-content: space-between;
      gap: 12px;
    }

    .round-scores {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(110px, 1fr));
      gap: 8px;
    }

    .round-scores span {
      background: #f8fafc;
      border-radius: 12px;
      padding: 6px 10px;
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    #chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 14px;
      font-size: 0.8rem;
      font-weight: 600;
    }

    .legend i {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      margin-right: 6px;
    }

    .commentary {
      line-height: 1.7;
      margin: 0;
      white-space: pre-line;
    }

    .commentary[data-loading="true"] {
      color: #8b857d;
      font-style: italic;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    dialog {
      border: none;
      border-radius: 24px;
      padding: 28px;
      width: min(480px, 92vw);
      box-shadow: var(--shadow);
    }

    dialog::backdrop {
      background: rgba(30, 41, 59, 0.4);
    }

    dialog form {
      display: grid;
      gap: 14px;
    }

    dialog label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      font-weight: 600;
      color: #5f5c57;
    }

    dialog input {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    .score-grid {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 12px;
    }

    .dialog-actions {
      display: flex;
      justify-content: flex-end;
      gap: 10px;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .card {
        padding: 22px 18px;
      }
      .rank-row {
        grid-template-columns: 42px 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="card">
      <div>
        <h1>{{CLUB_NAME}}</h1>
        <p class="subtitle">The prestigious foursome. Scores, rankings and trends.</p>
      </div>
      <div>
        <button class="btn-ghost" type="button" id="open-admin">Backup</button>
        <button class="btn-primary" type="button" id="open-add">+ Record Round</button>
      </div>
    </header>

    <section class="card">
      <div class="section-header">
        <div>
          <h2>Leaderboard</h2>
          <p class="subtitle" id="leaderboard-subtitle">Ranked by average score, lower is better.</p>
        </div>
        <select id="period" aria-label="Ranking period">
          <option value="ALL_TIME">All Time</option>
          <option value="WEEKLY">Weekly</option>
          <option value="MONTHLY">Monthly</option>
          <option value="QUARTERLY">Quarterly</option>
          <option value="SEMI_ANNUALLY">Semi-Annually</option>
          <option value="YEARLY">Yearly</option>
        </select>
      </div>
      <div class="ranking" id="ranking"></div>
    </section>

    <section class="card">
      <div class="section-header">
        <div>
          <h2>Recent Rounds</h2>
          <p class="subtitle" id="history-subtitle">Showing the 5 most recent rounds.</p>
        </div>
        <button class="btn-ghost" type="button" id="toggle-history" hidden>View All History</button>
      </div>
      <div class="history" id="history"></div>
    </section>

    <section class="card">
      <div>
        <h2>Score Trends</h2>
        <p class="subtitle" id="chart-subtitle">Performance trends for all members over all history.</p>
      </div>
      <div class="legend" id="legend"></div>
      <svg id="chart" viewBox="0 0 640 300" aria-label="Score trend chart" role="img"></svg>
    </section>

    <section class="card">
      <h2>Commentary</h2>
      <p class="commentary" id="commentary" data-loading="true">Analyzing performance data...</p>
    </section>

    <div class="status" id="status"></div>
  </main>

  <dialog id="round-dialog">
    <form id="round-form" method="dialog">
      <h2 id="round-dialog-title">Record Round</h2>
      <label>Date <input type="date" name="date" required /></label>
      <label>Course <input type="text" name="course" placeholder="Course name" /></label>
      <div class="score-grid" id="score-inputs"></div>
      <div class="dialog-actions">
        <button class="btn-ghost" type="button" id="cancel-round">Cancel</button>
        <button class="btn-primary" type="submit">Save</button>
      </div>
    </form>
  </dialog>

  <dialog id="admin-dialog">
    <form method="dialog">
      <h2>Backup &amp; Restore</h2>
      <p class="subtitle">Download every round as JSON, or restore from a backup file. Restoring overwrites all rounds.</p>
      <a class="btn-primary" id="export-link" href="/api/export" download>Download backup</a>
      <label>Restore from file <input type="file" id="import-file" accept="application/json,.json" /></label>
      <div class="dialog-actions">
        <button class="btn-ghost" type="submit">Close</button>
      </div>
    </form>
  </dialog>

  <script>
    const MEMBERS = {{MEMBERS}};
    const COLORS = { GREGORY: 'var(--gregory)', BIRCHAN: 'var(--birchan)', PETER: 'var(--peter)', SEVEN: 'var(--seven)' };

    const statusEl = document.getElementById('status');
    const periodEl = document.getElementById('period');
    const rankingEl = document.getElementById('ranking');
    const historyEl = document.getElementById('history');
    const historySubtitleEl = document.getElementById('history-subtitle');
    const toggleHistoryEl = document.getElementById('toggle-history');
    const chartEl = document.getElementById('chart');
    const chartSubtitleEl = document.getElementById('chart-subtitle');
    const legendEl = document.getElementById('legend');
    const commentaryEl = document.getElementById('commentary');
    const roundDialog = document.getElementById('round-dialog');
    const roundForm = document.getElementById('round-form');
    const roundTitleEl = document.getElementById('round-dialog-title');
    const scoreInputsEl = document.getElementById('score-inputs');
    const adminDialog = document.getElementById('admin-dialog');
    const importFileEl = document.getElementById('import-file');

    let showAllHistory = false;
    let editingId = null;
    let commentaryTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const escapeHtml = (value) => String(value)
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;');

    const formatAverage = (value) => {
      if (!value) {
        return '--';
      }
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res;
    };

    scoreInputsEl.innerHTML = MEMBERS
      .map((member) => `<label>${member.name} <input type="number" min="1" name="${member.name}" /></label>`)
      .join('');

    legendEl.innerHTML = MEMBERS
      .map((member) => `<span><i style="background:${COLORS[member.name]}"></i>${member.name}</span>`)
      .join('');

    const renderRanking = (board) => {
      rankingEl.innerHTML = board.stats
        .map((s) => `
          <div class="rank-row rank-${s.rank}">
            <div class="rank-badge">${s.rank}</div>
            <div>
              <div class="player-name" style="color:${COLORS[s.playerName]}">${s.playerName}</div>
              <div class="player-code">${s.memberCode} &middot; ${s.gamesPlayed} rounds</div>
            </div>
            <div class="metric"><span class="label">Average</span><span class="value">${formatAverage(s.averageScore)}</span></div>
            <div class="metric"><span class="label">Best</span><span class="value">${s.bestScore || '--'}</span></div>
            <div class="metric"><span class="label">Recent</span><span class="value">${s.recentScore || '--'}</span></div>
          </div>`)
        .join('');
    };

    const renderHistory = (history) => {
      historySubtitleEl.textContent = showAllHistory
        ? 'Viewing all round history.'
        : 'Showing the 5 most recent rounds.';
      toggleHistoryEl.hidden = history.total <= 5;
      toggleHistoryEl.textContent = showAllHistory ? 'Collapse' : 'View All History';

      if (!history.rounds.length) {
        historyEl.innerHTML = '<p class="subtitle">No rounds recorded yet.</p>';
        return;
      }
      historyEl.innerHTML = history.rounds
        .map((round) => `
          <div class="round">
            <div class="round-head">
              <div>
                <strong>${escapeHtml(round.course)}</strong>
                <div class="subtitle">${round.date}</div>
              </div>
              <div>
                <button class="btn-icon" type="button" data-edit="${escapeHtml(round.id)}">Edit</button>
                <button class="btn-icon" type="button" data-delete="${escapeHtml(round.id)}">Delete</button>
              </div>
            </div>
            <div class="round-scores">
              ${round.scores.map((s) => `<span style="color:${COLORS[s.playerName]}">${s.playerName} <strong>${s.score}</strong></span>`).join('')}
            </div>
          </div>`)
        .join('');
      historyEl.dataset.rounds = JSON.stringify(history.rounds);
    };

    const renderChart = (points) => {
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No rounds in this period</text>';
        return;
      }

      const width = 640;
      const height = 300;
      const paddingX = 44;
      const paddingY = 34;
      const top = 24;

      const values = points.flatMap((point) => MEMBERS
        .map((member) => point[member.name])
        .filter((value) => typeof value === 'number'));
      let min = Math.min(...values);
      let max = Math.max(...values);
      if (min === max) {
        min -= 1;
        max += 1;
      }

      const range = max - min;
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (index) => points.length > 1 ? paddingX + index * xStep : width / 2;
      // Lower scores are better, so the axis is reversed.
      const y = (value) => top + (value - min) * scaleY;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const labelEvery = points.length > 8 ? 2 : 1;
      const xLabels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          const label = point.date.split('-').slice(1).join('/');
          return `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${label}</text>`;
        })
        .join('');

      const series = MEMBERS.map((member) => {
        const color = COLORS[member.name];
        const present = points
          .map((point, index) => ({ index, value: point[member.name] }))
          .filter((point) => typeof point.value === 'number');
        const path = present
          .map((point, i) => `${i === 0 ? 'M' : 'L'} ${x(point.index).toFixed(2)} ${y(point.value).toFixed(2)}`)
          .join(' ');
        const circles = present
          .map((point) => `<circle class="chart-point" style="stroke:${color}" cx="${x(point.index)}" cy="${y(point.value)}" r="4" />`)
          .join('');
        return `<path class="chart-line" style="stroke:${color}" d="${path}" />${circles}`;
      }).join('');

      chartEl.setAttribute('viewBox', `0 0 ${width} ${height}`);
      chartEl.innerHTML = `${grid}${series}${xLabels}`;
    };

    const loadBoard = async () => {
      const period = periodEl.value;
      const [board, trend] = await Promise.all([
        request(`/api/leaderboard?period=${period}`).then((res) => res.json()),
        request(`/api/trend?period=${period}`).then((res) => res.json())
      ]);
      renderRanking(board);
      chartSubtitleEl.textContent = period === 'ALL_TIME'
        ? 'Performance trends for all members over all history.'
        : `Performance trends for all members for the current ${period.toLowerCase().replace('_', '-')} period.`;
      renderChart(trend);
    };

    const loadHistory = async () => {
      const res = await request(`/api/rounds?all=${showAllHistory}`);
      renderHistory(await res.json());
    };

    const pollCommentary = async () => {
      clearTimeout(commentaryTimer);
      const res = await request('/api/commentary');
      const data = await res.json();
      commentaryEl.textContent = data.text;
      commentaryEl.dataset.loading = String(data.loading);
      if (data.loading) {
        commentaryTimer = setTimeout(() => pollCommentary().catch(() => {}), 1500);
      }
    };

    const refresh = async () => {
      await Promise.all([loadBoard(), loadHistory(), pollCommentary()]);
    };

    const openRoundDialog = (round) => {
      editingId = round ? round.id : null;
      roundTitleEl.textContent = round ? 'Edit Round' : 'Record Round';
      roundForm.elements.date.value = round ? round.date : new Date().toISOString().split('T')[0];
      roundForm.elements.course.value = round ? round.course : '';
      MEMBERS.forEach((member) => {
        const entry = round ? round.scores.find((s) => s.playerName === member.name) : null;
        roundForm.elements[member.name].value = entry ? entry.score : '';
      });
      roundDialog.showModal();
    };

    const submitRound = async () => {
      const payload = {
        date: roundForm.elements.date.value,
        course: roundForm.elements.course.value.trim(),
        scores: MEMBERS.map((member) => ({
          playerName: member.name,
          score: parseInt(roundForm.elements[member.name].value, 10) || 0
        }))
      };
      if (!payload.course || payload.scores.some((s) => s.score <= 0)) {
        alert('Please fill in every field correctly.');
        return;
      }

      setStatus('Saving...', 'info');
      const url = editingId ? `/api/rounds/${encodeURIComponent(editingId)}` : '/api/rounds';
      await request(url, {
        method: editingId ? 'PUT' : 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      });
      roundDialog.close();
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
      await refresh();
    };

    const deleteRound = async (id) => {
      if (!confirm('Delete this round permanently?')) {
        return;
      }
      await request(`/api/rounds/${encodeURIComponent(id)}`, { method: 'DELETE' });
      setStatus('Round deleted', 'ok');
      await refresh();
    };

    const importBackup = async (file) => {
      const text = await file.text();
      const preview = await fetch('/api/import', { method: 'POST', body: text });
      if (!preview.ok) {
        alert(await preview.text());
        return;
      }
      const summary = await preview.json();
      if (!confirm(`Restore ${summary.rounds} rounds? Existing data will be overwritten.`)) {
        return;
      }
      await request('/api/import?confirm=true', { method: 'POST', body: text });
      alert('Restore complete.');
      adminDialog.close();
      await refresh();
    };

    periodEl.addEventListener('change', () => {
      loadBoard().catch((err) => setStatus(err.message, 'error'));
    });

    toggleHistoryEl.addEventListener('click', () => {
      showAllHistory = !showAllHistory;
      loadHistory().catch((err) => setStatus(err.message, 'error'));
    });

    historyEl.addEventListener('click', (event) => {
      const target = event.target;
      if (!(target instanceof HTMLElement)) {
        return;
      }
      if (target.dataset.delete) {
        deleteRound(target.dataset.delete).catch((err) => setStatus(err.message, 'error'));
      } else if (target.dataset.edit) {
        const rounds = JSON.parse(historyEl.dataset.rounds || '[]');
        const round = rounds.find((r) => r.id === target.dataset.edit);
        if (round) {
          openRoundDialog(round);
        }
      }
    });

    document.getElementById('open-add').addEventListener('click', () => openRoundDialog(null));
    document.getElementById('cancel-round').addEventListener('click', () => roundDialog.close());
    document.getElementById('open-admin').addEventListener('click', () => adminDialog.showModal());

    roundForm.addEventListener('submit', (event) => {
      event.preventDefault();
      submitRound().catch((err) => setStatus(err.message, 'error'));
    });

    importFileEl.addEventListener('change', () => {
      const file = importFileEl.files[0];
      importFileEl.value = '';
      if (!file) {
        return;
      }
      importBackup(file).catch(() => alert('Something went wrong while reading the file.'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
