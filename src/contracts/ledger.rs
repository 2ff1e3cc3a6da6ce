use ethers::prelude::*;

// Agent registry + project funding ledger ABI
abigen!(
    ProtocolLedger,
    r#"[
        function agents(address agent) external view returns (address wallet, string nodeId, uint256 pooledAmount, uint256 computeScore, uint256 joinedAt, bool active)
        function projects(uint256 projectId) external view returns (string name, string githubRepo, address creator, uint256 totalFunding, uint256 createdAt, uint8 status)
        function getProjectContributors(uint256 projectId) external view returns (address[])
        function contributions(uint256 projectId, address agent) external view returns (uint256 percentage, bool claimed)
        function agentCount() external view returns (uint256)
        function projectCount() external view returns (uint256)
        function totalPool() external view returns (uint256)
        function join(string nodeId, uint256 poolAmount) external
        function createProject(string name, string githubRepo, uint256 initialFunding) external returns (uint256)
        function fundProject(uint256 projectId, uint256 amount) external
        function recordContribution(uint256 projectId, address agent, uint256 percentage) external
        function completeProject(uint256 projectId) external
        function claimRewards(uint256 projectId) external
        event ProjectCreated(uint256 indexed projectId, address indexed creator, string name, uint256 initialFunding)
    ]"#
);
